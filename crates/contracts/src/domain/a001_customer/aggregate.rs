use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Код sentinel-клиента: системный/складской tenant,
/// который всегда работает с SYSTEM-каталогом навигации
pub const SYS_CUSTOMER_CODE: &str = "SYS";

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор клиента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub Uuid);

impl CustomerId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CustomerId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CustomerId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Клиент (организация-арендатор, владелец устройств и контрактов)
///
/// `base.description` хранит отображаемое имя, `base.code` — бизнес-код.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    pub base: BaseAggregate<CustomerId>,
}

impl Customer {
    /// Создать нового клиента для вставки в БД
    pub fn new_for_insert(code: String, name: String, comment: Option<String>) -> Self {
        let mut base = BaseAggregate::new(CustomerId::new_v4(), code, name);
        base.comment = comment;
        Self { base }
    }

    /// Системный клиент? (код "SYS")
    pub fn is_system(&self) -> bool {
        self.base.code == SYS_CUSTOMER_CODE
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &CustomerDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Customer name must not be empty".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Customer code must not be empty".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Customer {
    type Id = CustomerId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "customer"
    }

    fn element_name() -> &'static str {
        "Customer"
    }

    fn list_name() -> &'static str {
        "Customers"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления клиента
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sys_code_marks_system_customer() {
        let sys = Customer::new_for_insert("SYS".into(), "Kho hệ thống".into(), None);
        let acme = Customer::new_for_insert("ACME".into(), "Công ty ACME".into(), None);
        assert!(sys.is_system());
        assert!(!acme.is_system());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let customer = Customer::new_for_insert("KH-001".into(), "   ".into(), None);
        assert!(customer.validate().is_err());
    }
}
