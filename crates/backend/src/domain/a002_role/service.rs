use super::repository;
use contracts::domain::a001_customer::Customer;
use contracts::domain::a002_role::aggregate::{Role, RoleDto};
use contracts::shared::navigation::assignable_roles;
use uuid::Uuid;

/// Создание новой роли
pub async fn create(dto: RoleDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("ROLE-{}", Uuid::new_v4()));
    let mut aggregate = Role::new_for_insert(code, dto.name.clone(), dto.comment.clone());
    aggregate.is_active = dto.is_active.unwrap_or(true);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующей роли
pub async fn update(dto: RoleDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление роли
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение роли по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Role>> {
    repository::get_by_id(id).await
}

/// Получение списка ролей (опционально только активных)
pub async fn list_all(only_active: Option<bool>) -> anyhow::Result<Vec<Role>> {
    repository::list_all(only_active).await
}

/// Роли, доступные для выбора в области данного клиента.
///
/// Для не-системного клиента список ограничен ролями manager/user;
/// ошибка загрузки клиента не фатальна — деградируем до полного списка
/// активных ролей.
pub async fn list_assignable(customer_id: Option<Uuid>) -> anyhow::Result<Vec<Role>> {
    let roles = repository::list_all(Some(true)).await?;
    let customer: Option<Customer> = match customer_id {
        Some(id) => crate::domain::a001_customer::repository::get_by_id(id).await?,
        None => None,
    };
    Ok(assignable_roles(customer.as_ref(), &roles))
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> anyhow::Result<()> {
    let data = vec![
        RoleDto {
            id: None,
            code: Some("ROLE-ADMIN".into()),
            name: "Admin".into(),
            is_active: Some(true),
            comment: Some("Quản trị hệ thống".into()),
        },
        RoleDto {
            id: None,
            code: Some("ROLE-MANAGER".into()),
            name: "Manager".into(),
            is_active: Some(true),
            comment: Some("Quản lý khách hàng".into()),
        },
        RoleDto {
            id: None,
            code: Some("ROLE-USER".into()),
            name: "User".into(),
            is_active: Some(true),
            comment: None,
        },
    ];

    for dto in data {
        create(dto).await?;
    }

    Ok(())
}
