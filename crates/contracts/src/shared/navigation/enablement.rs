use super::catalog::{NavigationConfigItem, NavigationItem};
use std::collections::{HashMap, HashSet};

/// Сессионная модель включённости: какие пункты каталога и какие их
/// действия включены в редактируемой конфигурации.
///
/// Живёт в пределах одной сессии формы; при закрытии отбрасывается.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnablementModel {
    enabled_items: HashSet<String>,
    enabled_actions: HashMap<String, HashSet<String>>,
}

impl EnablementModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Засеять из каталога (режим создания): всё включено
    pub fn seed_from_catalog(catalog: &[NavigationItem]) -> Self {
        let mut model = Self::new();
        for item in catalog {
            model.enabled_items.insert(item.id.clone());
            if !item.actions.is_empty() {
                model
                    .enabled_actions
                    .insert(item.id.clone(), item.actions.iter().map(|a| a.id.clone()).collect());
            }
        }
        model
    }

    /// Засеять из сохранённой конфигурации (режим редактирования):
    /// включено ровно то, что перечислено в `config.items`
    pub fn seed_from_config(items: &[NavigationConfigItem]) -> Self {
        let mut model = Self::new();
        for item in items {
            model.enabled_items.insert(item.id.clone());
            model
                .enabled_actions
                .insert(item.id.clone(), item.actions.iter().map(|a| a.id.clone()).collect());
        }
        model
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Переключить пункт.
    ///
    /// Выключение стирает память о выборе действий; повторное включение
    /// заново включает все действия пункта (частичный выбор не восстанавливается).
    pub fn toggle_item(&mut self, item_id: &str, catalog: &[NavigationItem]) {
        if self.enabled_items.remove(item_id) {
            self.enabled_actions.remove(item_id);
            return;
        }
        self.enabled_items.insert(item_id.to_string());
        if let Some(item) = catalog.iter().find(|i| i.id == item_id) {
            if !item.actions.is_empty() {
                self.enabled_actions.insert(
                    item_id.to_string(),
                    item.actions.iter().map(|a| a.id.clone()).collect(),
                );
            }
        }
    }

    /// Переключить одно действие пункта.
    ///
    /// Не трогает `enabled_items`: вызов для выключенного пункта допустим
    /// на уровне модели (форма блокирует контрол, модель — нет).
    pub fn toggle_action(&mut self, item_id: &str, action_id: &str) {
        let actions = self.enabled_actions.entry(item_id.to_string()).or_default();
        if !actions.remove(action_id) {
            actions.insert(action_id.to_string());
        }
    }

    /// Переключить все действия пункта: из состояния "все включены" —
    /// в пустое, из любого другого — во "все включены".
    /// Для пункта без действий — no-op.
    pub fn toggle_all_actions(&mut self, item_id: &str, catalog: &[NavigationItem]) {
        let Some(item) = catalog.iter().find(|i| i.id == item_id) else {
            return;
        };
        if item.actions.is_empty() {
            return;
        }
        let full: HashSet<String> = item.actions.iter().map(|a| a.id.clone()).collect();
        let current = self.enabled_actions.entry(item_id.to_string()).or_default();
        if *current == full {
            current.clear();
        } else {
            *current = full;
        }
    }

    /// Массовое переключение по видимому (отфильтрованному) подмножеству.
    /// Пункты вне `visible` не затрагиваются.
    ///
    /// Если все видимые включены — выключает их (с очисткой действий),
    /// иначе включает все видимые с полным набором действий.
    pub fn toggle_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a NavigationItem>) {
        let visible: Vec<&NavigationItem> = visible.into_iter().collect();
        let all_enabled = visible.iter().all(|i| self.enabled_items.contains(&i.id));
        if all_enabled {
            for item in &visible {
                self.enabled_items.remove(&item.id);
                self.enabled_actions.remove(&item.id);
            }
        } else {
            for item in &visible {
                self.enabled_items.insert(item.id.clone());
                if item.actions.is_empty() {
                    self.enabled_actions.remove(&item.id);
                } else {
                    self.enabled_actions.insert(
                        item.id.clone(),
                        item.actions.iter().map(|a| a.id.clone()).collect(),
                    );
                }
            }
        }
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    pub fn is_item_enabled(&self, item_id: &str) -> bool {
        self.enabled_items.contains(item_id)
    }

    pub fn is_action_enabled(&self, item_id: &str, action_id: &str) -> bool {
        self.enabled_actions
            .get(item_id)
            .is_some_and(|a| a.contains(action_id))
    }

    pub fn enabled_item_count(&self) -> usize {
        self.enabled_items.len()
    }

    pub fn enabled_action_count(&self, item_id: &str) -> usize {
        self.enabled_actions.get(item_id).map_or(0, HashSet::len)
    }

    pub fn enabled_items(&self) -> &HashSet<String> {
        &self.enabled_items
    }

    pub fn enabled_actions(&self, item_id: &str) -> Option<&HashSet<String>> {
        self.enabled_actions.get(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::navigation::catalog::{NavigationAction, NavigationItem};

    fn action(id: &str) -> NavigationAction {
        NavigationAction {
            id: id.to_string(),
            label: id.to_string(),
            label_en: id.to_string(),
            label_vi: id.to_string(),
            icon: None,
        }
    }

    fn nav_item(id: &str, action_ids: &[&str]) -> NavigationItem {
        NavigationItem {
            id: id.to_string(),
            label: id.to_string(),
            label_en: id.to_string(),
            label_vi: id.to_string(),
            description: None,
            description_en: None,
            description_vi: None,
            route: format!("/{id}"),
            icon: None,
            actions: action_ids.iter().map(|a| action(a)).collect(),
        }
    }

    fn catalog() -> Vec<NavigationItem> {
        vec![
            nav_item("devices", &["a", "b", "c"]),
            nav_item("contracts", &["view"]),
            nav_item("dashboard", &[]),
        ]
    }

    #[test]
    fn seeding_from_config_is_idempotent() {
        let items = vec![nav_item("devices", &["a"]), nav_item("dashboard", &[])];
        let first = EnablementModel::seed_from_config(&items);
        let second = EnablementModel::seed_from_config(&items);
        assert_eq!(first, second);
        assert!(first.is_item_enabled("devices"));
        assert!(first.is_action_enabled("devices", "a"));
        assert_eq!(first.enabled_action_count("dashboard"), 0);
    }

    #[test]
    fn seed_from_catalog_enables_everything() {
        let catalog = catalog();
        let model = EnablementModel::seed_from_catalog(&catalog);
        assert_eq!(model.enabled_item_count(), 3);
        assert_eq!(model.enabled_action_count("devices"), 3);
        // Пункт без действий не получает записи в enabled_actions
        assert!(model.enabled_actions("dashboard").is_none());
    }

    #[test]
    fn toggle_item_resets_actions_to_full_set() {
        let catalog = catalog();
        let mut model = EnablementModel::seed_from_catalog(&catalog);

        // Оставляем только действие "a"
        model.toggle_action("devices", "b");
        model.toggle_action("devices", "c");
        assert_eq!(model.enabled_action_count("devices"), 1);

        // Выключаем и включаем пункт — частичный выбор не восстанавливается
        model.toggle_item("devices", &catalog);
        assert!(!model.is_item_enabled("devices"));
        assert!(model.enabled_actions("devices").is_none());

        model.toggle_item("devices", &catalog);
        assert!(model.is_item_enabled("devices"));
        assert_eq!(model.enabled_action_count("devices"), 3);
    }

    #[test]
    fn toggle_action_is_a_pure_set_flip() {
        let mut model = EnablementModel::new();
        model.toggle_action("devices", "a");
        assert!(model.is_action_enabled("devices", "a"));
        model.toggle_action("devices", "a");
        assert!(!model.is_action_enabled("devices", "a"));
    }

    #[test]
    fn toggle_all_actions_flips_between_full_and_empty() {
        let catalog = catalog();
        let mut model = EnablementModel::seed_from_catalog(&catalog);

        // Полный набор -> пустой
        model.toggle_all_actions("devices", &catalog);
        assert_eq!(model.enabled_action_count("devices"), 0);

        // Пустой -> полный
        model.toggle_all_actions("devices", &catalog);
        assert_eq!(model.enabled_action_count("devices"), 3);

        // Частичный -> полный
        model.toggle_action("devices", "a");
        model.toggle_all_actions("devices", &catalog);
        assert_eq!(model.enabled_action_count("devices"), 3);

        // Пункт без действий — no-op
        model.toggle_all_actions("dashboard", &catalog);
        assert_eq!(model.enabled_action_count("dashboard"), 0);
    }

    #[test]
    fn toggle_all_only_touches_visible_items() {
        let catalog = catalog();
        let mut model = EnablementModel::seed_from_catalog(&catalog);
        let visible = vec![catalog[0].clone(), catalog[1].clone()];

        // Все видимые включены -> выключаются, "dashboard" не трогаем
        model.toggle_all(&visible);
        assert!(!model.is_item_enabled("devices"));
        assert!(!model.is_item_enabled("contracts"));
        assert!(model.is_item_enabled("dashboard"));

        // Смешанное состояние -> все видимые включаются
        model.toggle_item("devices", &catalog);
        model.toggle_all(&visible);
        assert!(model.is_item_enabled("devices"));
        assert!(model.is_item_enabled("contracts"));
        assert_eq!(model.enabled_action_count("contracts"), 1);
        assert!(model.is_item_enabled("dashboard"));
    }
}
