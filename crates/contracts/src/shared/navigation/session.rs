use super::catalog::{Locale, NavigationConfigItem, NavigationItem};
use super::enablement::EnablementModel;
use crate::domain::a003_navigation_config::{
    NavigationConfig, NavigationConfigData, NavigationConfigDto,
};
use uuid::Uuid;

/// Сессия редактирования конфигурации навигации.
///
/// Держит разрешённый для области каталог, поля формы и модель
/// включённости. Создаётся при открытии формы, отбрасывается при
/// закрытии или после сохранения.
#[derive(Debug, Clone)]
pub struct AuthoringSession {
    catalog: Vec<NavigationItem>,
    model: EnablementModel,

    /// ID редактируемой конфигурации (None в режиме создания)
    pub editing_id: Option<String>,

    // Поля формы
    pub name: String,
    pub description: String,
    pub version: String,
    pub is_active: bool,
    pub customer_id: Option<Uuid>,
    pub role_id: Option<Uuid>,
}

impl AuthoringSession {
    /// Режим создания: всё из каталога включено, поля — по умолчанию
    pub fn new_create(catalog: Vec<NavigationItem>) -> Self {
        let model = EnablementModel::seed_from_catalog(&catalog);
        Self {
            catalog,
            model,
            editing_id: None,
            name: String::new(),
            description: String::new(),
            version: "1.0.0".to_string(),
            is_active: true,
            customer_id: None,
            role_id: None,
        }
    }

    /// Режим редактирования: включено то, что перечислено в сохранённой
    /// конфигурации, поля формы скопированы из неё
    pub fn new_edit(catalog: Vec<NavigationItem>, existing: &NavigationConfig) -> Self {
        let model = EnablementModel::seed_from_config(&existing.config.items);
        Self {
            catalog,
            model,
            editing_id: Some(existing.to_string_id()),
            name: existing.name().to_string(),
            description: existing.base.comment.clone().unwrap_or_default(),
            version: existing.version.clone(),
            is_active: existing.is_active,
            customer_id: existing.customer_id,
            role_id: existing.role_id,
        }
    }

    pub fn catalog(&self) -> &[NavigationItem] {
        &self.catalog
    }

    pub fn model(&self) -> &EnablementModel {
        &self.model
    }

    // ========================================================================
    // Filter / search
    // ========================================================================

    /// Пункты каталога, видимые при данном поисковом запросе.
    ///
    /// Регистронезависимое вхождение подстроки в локализованную подпись,
    /// id, локализованное описание или маршрут. Пустой запрос возвращает
    /// каталог целиком, порядок сохраняется.
    pub fn filter_items(&self, search: &str, locale: Locale) -> Vec<&NavigationItem> {
        let term = search.trim().to_lowercase();
        if term.is_empty() {
            return self.catalog.iter().collect();
        }
        self.catalog
            .iter()
            .filter(|item| {
                item.localized_label(locale).to_lowercase().contains(&term)
                    || item.id.to_lowercase().contains(&term)
                    || item
                        .localized_description(locale)
                        .is_some_and(|d| d.to_lowercase().contains(&term))
                    || item.route.to_lowercase().contains(&term)
            })
            .collect()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn toggle_item(&mut self, item_id: &str) {
        self.model.toggle_item(item_id, &self.catalog);
    }

    pub fn toggle_action(&mut self, item_id: &str, action_id: &str) {
        self.model.toggle_action(item_id, action_id);
    }

    pub fn toggle_all_actions(&mut self, item_id: &str) {
        self.model.toggle_all_actions(item_id, &self.catalog);
    }

    /// Массовое переключение по текущему отфильтрованному списку
    pub fn toggle_all(&mut self, search: &str, locale: Locale) {
        let visible: Vec<NavigationItem> =
            self.filter_items(search, locale).into_iter().cloned().collect();
        self.model.toggle_all(&visible);
    }

    // ========================================================================
    // Submit
    // ========================================================================

    /// Форма готова к отправке: имя непустое и включён хотя бы один пункт
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty() && self.model.enabled_item_count() > 0
    }

    /// Собрать DTO для Persistence Gateway.
    ///
    /// Выключенные пункты опускаются, порядок следует каталогу,
    /// действия каждого пункта урезаются до включённого подмножества.
    /// `None`, если форма не проходит гейт валидации (сетевой вызов
    /// в этом случае не выполняется).
    pub fn build_payload(&self) -> Option<NavigationConfigDto> {
        if !self.can_submit() {
            return None;
        }

        let items: Vec<NavigationConfigItem> = self
            .catalog
            .iter()
            .filter(|item| self.model.is_item_enabled(&item.id))
            .map(|item| {
                let mut trimmed = item.clone();
                trimmed.actions = item
                    .actions
                    .iter()
                    .filter(|a| self.model.is_action_enabled(&item.id, &a.id))
                    .cloned()
                    .collect();
                trimmed
            })
            .collect();

        let description = {
            let trimmed = self.description.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        Some(NavigationConfigDto {
            id: self.editing_id.clone(),
            name: self.name.trim().to_string(),
            description,
            version: self.version.clone(),
            is_active: self.is_active,
            customer_id: self.customer_id,
            role_id: self.role_id,
            config: NavigationConfigData {
                items,
                metadata: serde_json::Value::Object(serde_json::Map::new()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::navigation::catalog::system_catalog;

    fn create_session() -> AuthoringSession {
        AuthoringSession::new_create(system_catalog().to_vec())
    }

    #[test]
    fn create_mode_enables_entire_catalog() {
        let session = create_session();
        assert_eq!(
            session.model().enabled_item_count(),
            system_catalog().len()
        );
    }

    #[test]
    fn blank_search_returns_catalog_in_order() {
        let session = create_session();
        let visible = session.filter_items("   ", Locale::En);
        let ids: Vec<&str> = visible.iter().map(|i| i.id.as_str()).collect();
        let expected: Vec<&str> = system_catalog().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn search_matches_label_id_description_and_route() {
        let session = create_session();

        // По английской подписи
        assert!(session
            .filter_items("device models", Locale::En)
            .iter()
            .any(|i| i.id == "device-models"));

        // По вьетнамской подписи
        assert!(session
            .filter_items("hợp đồng", Locale::Vi)
            .iter()
            .any(|i| i.id == "contracts"));

        // По id и маршруту
        assert!(!session.filter_items("consumab", Locale::En).is_empty());
        assert!(session
            .filter_items("/service-requests", Locale::En)
            .iter()
            .any(|i| i.id == "service-requests"));
    }

    #[test]
    fn toggle_all_respects_current_filter() {
        let mut session = create_session();
        let matching: Vec<String> = session
            .filter_items("devices", Locale::En)
            .iter()
            .map(|i| i.id.clone())
            .collect();
        assert!(!matching.is_empty());
        assert!(matching.len() < system_catalog().len());

        session.toggle_all("devices", Locale::En);
        for id in &matching {
            assert!(!session.model().is_item_enabled(id));
        }
        // Непопавшие под фильтр пункты не тронуты
        assert!(session.model().is_item_enabled("contracts"));
    }

    #[test]
    fn submit_gate_requires_name_and_enabled_items() {
        let mut session = create_session();
        assert!(!session.can_submit()); // имя пустое
        assert!(session.build_payload().is_none());

        session.name = "Default".into();
        assert!(session.can_submit());

        session.toggle_all("", Locale::En); // выключаем всё
        assert_eq!(session.model().enabled_item_count(), 0);
        assert!(!session.can_submit());
        assert!(session.build_payload().is_none());
    }

    #[test]
    fn payload_omits_disabled_items_and_filters_actions() {
        let mut session = create_session();
        session.name = "ACME manager".into();

        session.toggle_item("dashboard");
        session.toggle_action("devices", "delete");
        session.toggle_action("devices", "export");

        let payload = session.build_payload().expect("payload");
        let ids: Vec<&str> = payload.config.items.iter().map(|i| i.id.as_str()).collect();
        assert!(!ids.contains(&"dashboard"));

        // Порядок следует каталогу
        let catalog_order: Vec<&str> = system_catalog()
            .iter()
            .map(|i| i.id.as_str())
            .filter(|id| ids.contains(id))
            .collect();
        assert_eq!(ids, catalog_order);

        let devices = payload
            .config
            .items
            .iter()
            .find(|i| i.id == "devices")
            .expect("devices item");
        let action_ids: Vec<&str> = devices.actions.iter().map(|a| a.id.as_str()).collect();
        assert!(!action_ids.contains(&"delete"));
        assert!(!action_ids.contains(&"export"));
        assert!(action_ids.contains(&"view"));
    }

    #[test]
    fn payload_drops_blank_description() {
        let mut session = create_session();
        session.name = "Default".into();
        session.description = "   ".into();
        let payload = session.build_payload().expect("payload");
        assert!(payload.description.is_none());
        assert!(payload.config.metadata.is_object());
    }

    #[test]
    fn edit_mode_round_trips_form_fields() {
        let mut session = create_session();
        session.name = "Portal".into();
        session.description = "Portal menu".into();
        session.toggle_item("dashboard");
        let dto = session.build_payload().expect("payload");

        let stored = NavigationConfig::new_for_insert(&dto);
        let reopened = AuthoringSession::new_edit(system_catalog().to_vec(), &stored);

        assert_eq!(reopened.name, "Portal");
        assert_eq!(reopened.description, "Portal menu");
        assert_eq!(
            reopened.model().enabled_item_count(),
            system_catalog().len() - 1
        );
        assert!(!reopened.model().is_item_enabled("dashboard"));
    }
}
