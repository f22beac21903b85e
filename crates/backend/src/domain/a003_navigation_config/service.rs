use super::repository::{self, ListFilter};
use contracts::domain::a003_navigation_config::aggregate::{NavigationConfig, NavigationConfigDto};
use contracts::shared::navigation::{
    infer_default_mode, resolve_catalog, Catalogs, NavigationItem,
};
use thiserror::Error;
use uuid::Uuid;

/// Ошибки сервиса конфигураций навигации
#[derive(Debug, Error)]
pub enum NavigationConfigError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Navigation config not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, NavigationConfigError>;

/// Разрешить каталог для области конфигурации.
///
/// Режим по умолчанию (когда клиент не задан) выводится из id пунктов
/// самой конфигурации: префикс "user-" означает USER-каталог.
async fn catalog_for(dto: &NavigationConfigDto) -> Result<Vec<NavigationItem>> {
    let customers = crate::domain::a001_customer::repository::list_all().await?;
    let catalogs = Catalogs::builtin();
    let mode = infer_default_mode(Some(&dto.config.items));
    Ok(resolve_catalog(&catalogs, dto.customer_id, &customers, mode).to_vec())
}

/// Создание новой конфигурации
pub async fn create(dto: NavigationConfigDto) -> Result<Uuid> {
    let mut aggregate = NavigationConfig::new_for_insert(&dto);

    aggregate
        .validate()
        .map_err(NavigationConfigError::Validation)?;

    let catalog = catalog_for(&dto).await?;
    aggregate
        .validate_against_catalog(&catalog)
        .map_err(NavigationConfigError::Validation)?;

    aggregate.before_write();

    Ok(repository::insert(&aggregate).await?)
}

/// Обновление существующей конфигурации
pub async fn update(dto: NavigationConfigDto) -> Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| NavigationConfigError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(NavigationConfigError::NotFound)?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(NavigationConfigError::Validation)?;

    let catalog = catalog_for(&dto).await?;
    aggregate
        .validate_against_catalog(&catalog)
        .map_err(NavigationConfigError::Validation)?;

    aggregate.before_write();

    Ok(repository::update(&aggregate).await?)
}

/// Мягкое удаление конфигурации
pub async fn delete(id: Uuid) -> Result<bool> {
    Ok(repository::soft_delete(id).await?)
}

/// Получение конфигурации по ID
pub async fn get_by_id(id: Uuid) -> Result<Option<NavigationConfig>> {
    Ok(repository::get_by_id(id).await?)
}

/// Список конфигураций по фильтру
pub async fn list_all(filter: ListFilter) -> Result<Vec<NavigationConfig>> {
    Ok(repository::list_all(filter).await?)
}

/// Постраничный список конфигураций
pub async fn list_paginated(
    filter: ListFilter,
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
) -> Result<(Vec<NavigationConfig>, u64)> {
    Ok(repository::list_paginated(filter, limit, offset, sort_by, sort_desc).await?)
}

/// Действующая конфигурация для области (default-vs-override).
///
/// Наиболее специфичная активная конфигурация выигрывает:
/// (клиент, роль) -> (клиент, —) -> (глобальная, —).
pub async fn resolve_effective(
    customer_id: Option<Uuid>,
    role_id: Option<Uuid>,
) -> Result<NavigationConfig> {
    let scopes = [(customer_id, role_id), (customer_id, None), (None, None)];

    let mut previous: Option<(Option<Uuid>, Option<Uuid>)> = None;
    for scope in scopes {
        if previous == Some(scope) {
            continue;
        }
        previous = Some(scope);

        if let Some(config) = repository::find_by_scope(scope.0, scope.1).await? {
            return Ok(config);
        }
    }
    Err(NavigationConfigError::NotFound)
}

/// Вставка тестовых данных: глобальная конфигурация со всеми пунктами
/// SYSTEM-каталога
pub async fn insert_test_data() -> anyhow::Result<()> {
    use contracts::shared::navigation::AuthoringSession;

    let mut session = AuthoringSession::new_create(
        contracts::shared::navigation::catalog::system_catalog().to_vec(),
    );
    session.name = "Default navigation".into();
    session.description = "Cấu hình mặc định cho quản trị viên".into();

    let dto = session
        .build_payload()
        .ok_or_else(|| anyhow::anyhow!("default payload must pass the submit gate"))?;
    create(dto).await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
