use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::navigation::catalog::{NavigationConfigItem, NavigationItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор конфигурации навигации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavigationConfigId(pub Uuid);

impl NavigationConfigId {
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

impl AggregateId for NavigationConfigId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(NavigationConfigId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Сериализуемое тело конфигурации: включённые пункты (с урезанными
/// до включённого подмножества действиями) плюс произвольные метаданные
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfigData {
    pub items: Vec<NavigationConfigItem>,

    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
}

fn empty_metadata() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Default for NavigationConfigData {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            metadata: empty_metadata(),
        }
    }
}

/// Именованная конфигурация навигации, опционально привязанная
/// к клиенту и/или роли.
///
/// `customer_id = None` означает глобальную (default) конфигурацию,
/// `role_id = None` — "применяется независимо от роли".
/// `base.description` хранит обязательное имя, `base.comment` —
/// необязательное текстовое описание.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(flatten)]
    pub base: BaseAggregate<NavigationConfigId>,

    /// Свободная версия конфигурации, по умолчанию "1.0.0"
    pub version: String,

    #[serde(rename = "isActive")]
    pub is_active: bool,

    #[serde(rename = "customerId")]
    pub customer_id: Option<Uuid>,

    #[serde(rename = "roleId")]
    pub role_id: Option<Uuid>,

    pub config: NavigationConfigData,
}

impl NavigationConfig {
    /// Создать новую конфигурацию для вставки в БД
    pub fn new_for_insert(dto: &NavigationConfigDto) -> Self {
        let id = NavigationConfigId::new_v4();
        let code = format!("NAV-{}", &id.as_string()[..8]);
        let mut base = BaseAggregate::new(id, code, dto.name.clone());
        base.comment = dto.description.clone();

        Self {
            base,
            version: dto.version.clone(),
            is_active: dto.is_active,
            customer_id: dto.customer_id,
            role_id: dto.role_id,
            config: dto.config.clone(),
        }
    }

    /// Имя конфигурации
    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &NavigationConfigDto) {
        self.base.description = dto.name.clone();
        self.base.comment = dto.description.clone();
        self.version = dto.version.clone();
        self.is_active = dto.is_active;
        self.customer_id = dto.customer_id;
        self.role_id = dto.role_id;
        self.config = dto.config.clone();
    }

    /// Валидация данных
    ///
    /// Имя обязательно, конфигурация должна содержать хотя бы один
    /// включённый пункт, id пунктов уникальны.
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Configuration name must not be empty".into());
        }
        if self.config.items.is_empty() {
            return Err("Configuration must enable at least one navigation item".into());
        }
        let mut seen = HashSet::new();
        for item in &self.config.items {
            if !seen.insert(item.id.as_str()) {
                return Err(format!("Duplicate navigation item id: {}", item.id));
            }
        }
        Ok(())
    }

    /// Проверить конфигурацию против каталога-источника: каждый пункт
    /// и каждое действие должны существовать в каталоге (действия
    /// нельзя "изобрести")
    pub fn validate_against_catalog(&self, catalog: &[NavigationItem]) -> Result<(), String> {
        for item in &self.config.items {
            let Some(source) = catalog.iter().find(|c| c.id == item.id) else {
                return Err(format!("Unknown navigation item id: {}", item.id));
            };
            for action in &item.actions {
                if !source.actions.iter().any(|a| a.id == action.id) {
                    return Err(format!(
                        "Unknown action '{}' for navigation item '{}'",
                        action.id, item.id
                    ));
                }
            }
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for NavigationConfig {
    type Id = NavigationConfigId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "navigation_config"
    }

    fn element_name() -> &'static str {
        "Navigation configuration"
    }

    fn list_name() -> &'static str {
        "Navigation configurations"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_true() -> bool {
    true
}

/// DTO для создания/обновления конфигурации навигации
/// (wire-форма, camelCase)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfigDto {
    pub id: Option<String>,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,

    #[serde(rename = "customerId")]
    pub customer_id: Option<Uuid>,

    #[serde(rename = "roleId")]
    pub role_id: Option<Uuid>,

    #[serde(default)]
    pub config: NavigationConfigData,
}

impl Default for NavigationConfigDto {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            version: default_version(),
            is_active: true,
            customer_id: None,
            role_id: None,
            config: NavigationConfigData::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::navigation::catalog::system_catalog;

    fn dto_with_items(name: &str, items: Vec<NavigationConfigItem>) -> NavigationConfigDto {
        NavigationConfigDto {
            name: name.into(),
            config: NavigationConfigData {
                items,
                metadata: serde_json::json!({}),
            },
            ..Default::default()
        }
    }

    #[test]
    fn validate_rejects_blank_name_and_empty_items() {
        let catalog = system_catalog();
        let blank = NavigationConfig::new_for_insert(&dto_with_items("  ", vec![catalog[0].clone()]));
        assert!(blank.validate().is_err());

        let empty = NavigationConfig::new_for_insert(&dto_with_items("Default", vec![]));
        assert!(empty.validate().is_err());

        let ok = NavigationConfig::new_for_insert(&dto_with_items("Default", vec![catalog[0].clone()]));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_item_ids() {
        let catalog = system_catalog();
        let config = NavigationConfig::new_for_insert(&dto_with_items(
            "Default",
            vec![catalog[0].clone(), catalog[0].clone()],
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn catalog_check_rejects_invented_actions() {
        let catalog = system_catalog();
        let mut item = catalog[1].clone();
        item.actions[0].id = "made-up".into();
        let config = NavigationConfig::new_for_insert(&dto_with_items("Default", vec![item]));
        assert!(config.validate_against_catalog(catalog).is_err());

        let genuine = NavigationConfig::new_for_insert(&dto_with_items(
            "Default",
            vec![catalog[1].clone()],
        ));
        assert!(genuine.validate_against_catalog(catalog).is_ok());
    }

    #[test]
    fn dto_defaults_follow_wire_contract() {
        let dto: NavigationConfigDto = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!(dto.version, "1.0.0");
        assert!(dto.is_active);
        assert!(dto.customer_id.is_none());
        assert!(dto.config.items.is_empty());
        assert!(dto.config.metadata.is_object());
    }
}
