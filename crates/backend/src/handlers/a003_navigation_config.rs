use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::a003_navigation_config::repository::ListFilter;
use crate::domain::a003_navigation_config::service::{self, NavigationConfigError};
use contracts::domain::a003_navigation_config::NavigationConfig;
use contracts::shared::navigation::{
    resolve_catalog_kind, CatalogKind, Catalogs, NavigationItem,
};

fn status_for(err: &NavigationConfigError) -> axum::http::StatusCode {
    match err {
        NavigationConfigError::Validation(_) => axum::http::StatusCode::UNPROCESSABLE_ENTITY,
        NavigationConfigError::NotFound => axum::http::StatusCode::NOT_FOUND,
        NavigationConfigError::Storage(e) => {
            tracing::error!("navigation config storage error: {e:#}");
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Deserialize)]
pub struct NavigationConfigListParams {
    pub customer_id: Option<uuid::Uuid>,
    pub role_id: Option<uuid::Uuid>,
    pub is_active: Option<bool>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
}

impl NavigationConfigListParams {
    fn filter(&self) -> ListFilter {
        ListFilter {
            customer_id: self.customer_id,
            role_id: self.role_id,
            is_active: self.is_active,
        }
    }
}

#[derive(Serialize)]
pub struct NavigationConfigPaginatedResponse {
    pub items: Vec<NavigationConfig>,
    pub total: u64,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

#[derive(Deserialize)]
pub struct CatalogParams {
    pub customer_id: Option<uuid::Uuid>,
    #[serde(default)]
    pub mode: CatalogKind,
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub kind: CatalogKind,
    pub items: Vec<NavigationItem>,
}

#[derive(Deserialize)]
pub struct EffectiveParams {
    pub customer_id: Option<uuid::Uuid>,
    pub role_id: Option<uuid::Uuid>,
}

/// GET /api/navigation-config
pub async fn list_all(
    Query(params): Query<NavigationConfigListParams>,
) -> Result<Json<Vec<NavigationConfig>>, axum::http::StatusCode> {
    match service::list_all(params.filter()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/navigation-config/list
pub async fn list_paginated(
    Query(params): Query<NavigationConfigListParams>,
) -> Result<Json<NavigationConfigPaginatedResponse>, axum::http::StatusCode> {
    let limit = params.limit.unwrap_or(100).clamp(10, 10000);
    let offset = params.offset.unwrap_or(0);
    let sort_by = params.sort_by.as_deref().unwrap_or("description");
    let sort_desc = params.sort_desc.unwrap_or(false);

    match service::list_paginated(params.filter(), limit, offset, sort_by, sort_desc).await {
        Ok((items, total)) => {
            let page_size = limit as usize;
            let page = (offset as usize) / page_size;
            let total_pages = ((total as usize) + page_size - 1) / page_size;

            Ok(Json(NavigationConfigPaginatedResponse {
                items,
                total,
                page,
                page_size,
                total_pages,
            }))
        }
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/navigation-config/catalog
///
/// Каталог, применимый к области (SYS-клиент всегда получает SYSTEM)
pub async fn resolve_scope_catalog(
    Query(params): Query<CatalogParams>,
) -> Result<Json<CatalogResponse>, axum::http::StatusCode> {
    // Недоступный список клиентов деградирует в пустой — резолвер
    // вернёт USER-каталог для любого непустого customer_id
    let customers = crate::domain::a001_customer::service::list_all()
        .await
        .unwrap_or_default();

    let kind = resolve_catalog_kind(params.customer_id, &customers, params.mode);
    let catalogs = Catalogs::builtin();
    let items = match kind {
        CatalogKind::System => catalogs.system,
        CatalogKind::User => catalogs.user,
    };
    Ok(Json(CatalogResponse { kind, items }))
}

/// GET /api/navigation-config/effective
///
/// Действующая конфигурация для области: (клиент, роль) ->
/// (клиент, —) -> (глобальная, —)
pub async fn get_effective(
    Query(params): Query<EffectiveParams>,
) -> Result<Json<NavigationConfig>, axum::http::StatusCode> {
    match service::resolve_effective(params.customer_id, params.role_id).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(status_for(&e)),
    }
}

/// GET /api/navigation-config/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<NavigationConfig>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// POST /api/navigation-config
pub async fn upsert(
    Json(dto): Json<contracts::domain::a003_navigation_config::NavigationConfigDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = match dto.id.clone() {
        Some(id) => service::update(dto).await.map(|_| id),
        None => service::create(dto).await.map(|id| id.to_string()),
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(status_for(&e)),
    }
}

/// DELETE /api/navigation-config/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(status_for(&e)),
    }
}

/// POST /api/navigation-config/testdata
pub async fn insert_test_data() -> axum::http::StatusCode {
    match service::insert_test_data().await {
        Ok(_) => axum::http::StatusCode::OK,
        Err(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
    }
}
