use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор роли
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub Uuid);

impl RoleId {
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

impl AggregateId for RoleId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(RoleId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Роль пользователя (Admin, Manager, User, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(flatten)]
    pub base: BaseAggregate<RoleId>,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Role {
    /// Создать новую роль для вставки в БД
    pub fn new_for_insert(code: String, name: String, comment: Option<String>) -> Self {
        let mut base = BaseAggregate::new(RoleId::new_v4(), code, name);
        base.comment = comment;
        Self {
            base,
            is_active: true,
        }
    }

    /// Имя роли, нормализованное для сравнения (trim + lowercase)
    pub fn normalized_name(&self) -> String {
        self.base.description.trim().to_lowercase()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &RoleDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        self.is_active = dto.is_active.unwrap_or(true);
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Role name must not be empty".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Role code must not be empty".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Role {
    type Id = RoleId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "role"
    }

    fn element_name() -> &'static str {
        "Role"
    }

    fn list_name() -> &'static str {
        "Roles"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления роли
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoleDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,

    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,

    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_name_trims_and_lowercases() {
        let role = Role::new_for_insert("R-MGR".into(), "  Manager ".into(), None);
        assert_eq!(role.normalized_name(), "manager");
    }
}
