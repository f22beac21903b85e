use super::repository;
use contracts::domain::a001_customer::aggregate::{Customer, CustomerDto, SYS_CUSTOMER_CODE};
use uuid::Uuid;

/// Создание нового клиента
pub async fn create(dto: CustomerDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("KH-{}", Uuid::new_v4()));
    let mut aggregate = Customer::new_for_insert(code, dto.name, dto.comment);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующего клиента
pub async fn update(dto: CustomerDto) -> anyhow::Result<()> {
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

/// Мягкое удаление клиента
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение клиента по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Customer>> {
    repository::get_by_id(id).await
}

/// Получение списка всех клиентов
pub async fn list_all() -> anyhow::Result<Vec<Customer>> {
    repository::list_all().await
}

/// Гарантировать наличие системного клиента (код "SYS") при старте
pub async fn ensure_sys_customer_exists() -> anyhow::Result<()> {
    if repository::get_by_code(SYS_CUSTOMER_CODE).await?.is_some() {
        return Ok(());
    }
    tracing::info!("Seeding system customer (code = {})", SYS_CUSTOMER_CODE);
    create(CustomerDto {
        id: None,
        code: Some(SYS_CUSTOMER_CODE.into()),
        name: "Kho hệ thống".into(),
        comment: Some("System/warehouse tenant".into()),
    })
    .await?;
    Ok(())
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> anyhow::Result<()> {
    let data = vec![
        CustomerDto {
            id: None,
            code: Some("KH-00001".into()),
            name: "Công ty TNHH ACME Việt Nam".into(),
            comment: Some("Khách hàng thuê máy in văn phòng".into()),
        },
        CustomerDto {
            id: None,
            code: Some("KH-00002".into()),
            name: "Bệnh viện Đa khoa Thành phố".into(),
            comment: None,
        },
        CustomerDto {
            id: None,
            code: Some("KH-00003".into()),
            name: "Trường Đại học Bách Khoa".into(),
            comment: Some("Hợp đồng bảo trì thiết bị".into()),
        },
    ];

    for dto in data {
        create(dto).await?;
    }

    Ok(())
}
