use chrono::Utc;
use contracts::domain::a003_navigation_config::aggregate::{
    NavigationConfig, NavigationConfigData, NavigationConfigId,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_navigation_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub config_version: String,
    pub is_active: bool,
    pub customer_id: Option<String>,
    pub role_id: Option<String>,
    pub config_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for NavigationConfig {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        // Повреждённый JSON деградирует в пустую конфигурацию
        let config: NavigationConfigData =
            serde_json::from_str(&m.config_json).unwrap_or_default();

        NavigationConfig {
            base: BaseAggregate::with_metadata(
                NavigationConfigId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            version: m.config_version,
            is_active: m.is_active,
            customer_id: m.customer_id.and_then(|s| Uuid::parse_str(&s).ok()),
            role_id: m.role_id.and_then(|s| Uuid::parse_str(&s).ok()),
            config,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &NavigationConfig, bump_version: bool) -> anyhow::Result<ActiveModel> {
    let config_json = serde_json::to_string(&aggregate.config)?;
    let bump = if bump_version { 1 } else { 0 };
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        config_version: Set(aggregate.version.clone()),
        is_active: Set(aggregate.is_active),
        customer_id: Set(aggregate.customer_id.map(|u| u.to_string())),
        role_id: Set(aggregate.role_id.map(|u| u.to_string())),
        config_json: Set(config_json),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version + bump),
    })
}

/// Фильтр списка конфигураций
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    pub customer_id: Option<Uuid>,
    pub role_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

fn apply_filter(mut query: Select<Entity>, filter: ListFilter) -> Select<Entity> {
    query = query.filter(Column::IsDeleted.eq(false));
    if let Some(customer_id) = filter.customer_id {
        query = query.filter(Column::CustomerId.eq(customer_id.to_string()));
    }
    if let Some(role_id) = filter.role_id {
        query = query.filter(Column::RoleId.eq(role_id.to_string()));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(Column::IsActive.eq(is_active));
    }
    query
}

pub async fn list_all(filter: ListFilter) -> anyhow::Result<Vec<NavigationConfig>> {
    let items = apply_filter(Entity::find(), filter)
        .order_by_asc(Column::Description)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_paginated(
    filter: ListFilter,
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
) -> anyhow::Result<(Vec<NavigationConfig>, u64)> {
    let column = match sort_by {
        "name" | "description" => Column::Description,
        "created_at" => Column::CreatedAt,
        "updated_at" => Column::UpdatedAt,
        "version" => Column::ConfigVersion,
        _ => Column::Description,
    };

    let total = apply_filter(Entity::find(), filter).count(conn()).await?;

    let mut query = apply_filter(Entity::find(), filter);
    query = if sort_desc {
        query.order_by_desc(column)
    } else {
        query.order_by_asc(column)
    };

    let items = query
        .limit(limit)
        .offset(offset)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<NavigationConfig>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Активная конфигурация для точной области (customer, role);
/// `None` в области означает `IS NULL`, не "любое значение".
/// При нескольких кандидатах выигрывает последняя записанная.
pub async fn find_by_scope(
    customer_id: Option<Uuid>,
    role_id: Option<Uuid>,
) -> anyhow::Result<Option<NavigationConfig>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::IsActive.eq(true));

    query = match customer_id {
        Some(id) => query.filter(Column::CustomerId.eq(id.to_string())),
        None => query.filter(Column::CustomerId.is_null()),
    };
    query = match role_id {
        Some(id) => query.filter(Column::RoleId.eq(id.to_string())),
        None => query.filter(Column::RoleId.is_null()),
    };

    let result = query
        .order_by_desc(Column::UpdatedAt)
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &NavigationConfig) -> anyhow::Result<Uuid> {
    let active = to_active(aggregate, false)?;
    Entity::insert(active).exec(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &NavigationConfig) -> anyhow::Result<()> {
    let active = to_active(aggregate, true)?;
    Entity::update(active).exec(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    let Some(model) = Entity::find_by_id(id.to_string()).one(conn()).await? else {
        return Ok(false);
    };
    let mut active: ActiveModel = model.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Some(Utc::now()));
    Entity::update(active).exec(conn()).await?;
    Ok(true)
}
