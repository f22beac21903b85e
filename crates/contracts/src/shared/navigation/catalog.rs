use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// Catalog types
// ============================================================================

/// Действие внутри пункта навигации (кнопка на странице)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationAction {
    pub id: String,
    pub label: String,

    #[serde(rename = "labelEn")]
    pub label_en: String,

    #[serde(rename = "labelVi")]
    pub label_vi: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Пункт каталога навигации (неизменяемый, поставляется константами)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub id: String,
    pub label: String,

    #[serde(rename = "labelEn")]
    pub label_en: String,

    #[serde(rename = "labelVi")]
    pub label_vi: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "descriptionEn", skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,

    #[serde(rename = "descriptionVi", skip_serializing_if = "Option::is_none")]
    pub description_vi: Option<String>,

    pub route: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub actions: Vec<NavigationAction>,
}

/// Сериализованная копия пункта каталога внутри сохранённой конфигурации.
/// Форма та же, но `actions` урезан до включённого подмножества.
pub type NavigationConfigItem = NavigationItem;

/// Локаль отображения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Vi,
}

impl NavigationItem {
    /// Локализованная подпись с fallback на базовый `label`
    pub fn localized_label(&self, locale: Locale) -> &str {
        let localized = match locale {
            Locale::En => &self.label_en,
            Locale::Vi => &self.label_vi,
        };
        if localized.is_empty() {
            &self.label
        } else {
            localized
        }
    }

    /// Локализованное описание с тем же fallback, что и у подписи
    pub fn localized_description(&self, locale: Locale) -> Option<&str> {
        let localized = match locale {
            Locale::En => self.description_en.as_deref(),
            Locale::Vi => self.description_vi.as_deref(),
        };
        localized.or(self.description.as_deref())
    }

    /// ID всех действий пункта (в порядке каталога)
    pub fn action_ids(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.id.clone()).collect()
    }
}

/// Удалить дубликаты действий по id, первое вхождение выигрывает.
/// Инвариант каталога: id действий уникальны внутри пункта.
pub fn dedupe_actions(actions: Vec<NavigationAction>) -> Vec<NavigationAction> {
    let mut seen = std::collections::HashSet::new();
    actions
        .into_iter()
        .filter(|a| seen.insert(a.id.clone()))
        .collect()
}

// ============================================================================
// Built-in catalogs
// ============================================================================

/// Пара каталогов (SYSTEM / USER), передаётся в резолвер явно,
/// чтобы в тестах можно было подставить альтернативные списки
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub system: Vec<NavigationItem>,
    pub user: Vec<NavigationItem>,
}

impl Catalogs {
    /// Встроенные каталоги приложения
    pub fn builtin() -> Self {
        Self {
            system: system_catalog().to_vec(),
            user: user_catalog().to_vec(),
        }
    }
}

fn action(id: &str, label_vi: &str, label_en: &str, icon: Option<&str>) -> NavigationAction {
    NavigationAction {
        id: id.to_string(),
        label: label_vi.to_string(),
        label_en: label_en.to_string(),
        label_vi: label_vi.to_string(),
        icon: icon.map(str::to_string),
    }
}

fn item(
    id: &str,
    label_vi: &str,
    label_en: &str,
    description_en: Option<&str>,
    route: &str,
    icon: &str,
    actions: Vec<NavigationAction>,
) -> NavigationItem {
    NavigationItem {
        id: id.to_string(),
        label: label_vi.to_string(),
        label_en: label_en.to_string(),
        label_vi: label_vi.to_string(),
        description: None,
        description_en: description_en.map(str::to_string),
        description_vi: None,
        route: route.to_string(),
        icon: Some(icon.to_string()),
        actions: dedupe_actions(actions),
    }
}

fn crud_actions() -> Vec<NavigationAction> {
    vec![
        action("view", "Xem chi tiết", "View details", Some("eye")),
        action("create", "Thêm mới", "Create", Some("plus")),
        action("edit", "Chỉnh sửa", "Edit", Some("pencil")),
        action("delete", "Xóa", "Delete", Some("trash")),
    ]
}

/// SYSTEM-каталог: полное меню администратора (аналог NAVIGATION_PAYLOAD)
static SYSTEM_CATALOG: Lazy<Vec<NavigationItem>> = Lazy::new(|| {
    vec![
        item(
            "dashboard",
            "Tổng quan",
            "Dashboard",
            Some("Summary of devices, contracts and service activity"),
            "/dashboard",
            "gauge",
            vec![],
        ),
        item(
            "customers",
            "Khách hàng",
            "Customers",
            Some("Customer registry"),
            "/customers",
            "users",
            {
                let mut a = crud_actions();
                a.push(action("export", "Xuất Excel", "Export to Excel", Some("download")));
                a
            },
        ),
        item(
            "devices",
            "Thiết bị",
            "Devices",
            Some("Devices installed at customer sites"),
            "/devices",
            "printer",
            {
                let mut a = crud_actions();
                a.push(action("assign", "Gán khách hàng", "Assign customer", Some("link")));
                a.push(action("export", "Xuất Excel", "Export to Excel", Some("download")));
                a
            },
        ),
        item(
            "device-models",
            "Mẫu thiết bị",
            "Device models",
            Some("Device model catalog"),
            "/device-models",
            "boxes",
            crud_actions(),
        ),
        item(
            "contracts",
            "Hợp đồng",
            "Contracts",
            Some("Rental and maintenance contracts"),
            "/contracts",
            "file-text",
            {
                let mut a = crud_actions();
                a.push(action("renew", "Gia hạn", "Renew", Some("refresh")));
                a
            },
        ),
        item(
            "consumables",
            "Vật tư tiêu hao",
            "Consumables",
            Some("Toner, drums and other consumables"),
            "/consumables",
            "droplet",
            crud_actions(),
        ),
        item(
            "service-requests",
            "Yêu cầu dịch vụ",
            "Service requests",
            Some("Repair and maintenance requests"),
            "/service-requests",
            "wrench",
            vec![
                action("view", "Xem chi tiết", "View details", Some("eye")),
                action("create", "Thêm mới", "Create", Some("plus")),
                action("assign", "Phân công", "Assign technician", Some("user-check")),
                action("close", "Đóng yêu cầu", "Close request", Some("check")),
            ],
        ),
        item(
            "navigation-configs",
            "Cấu hình điều hướng",
            "Navigation configuration",
            Some("Per-customer menu and action enablement"),
            "/navigation-configs",
            "list-tree",
            crud_actions(),
        ),
    ]
});

/// USER-каталог: меню конечного пользователя клиента
/// (аналог USER_NAVIGATION_PAYLOAD, id с префиксом "user-")
static USER_CATALOG: Lazy<Vec<NavigationItem>> = Lazy::new(|| {
    vec![
        item(
            "user-dashboard",
            "Tổng quan",
            "Dashboard",
            None,
            "/portal/dashboard",
            "gauge",
            vec![],
        ),
        item(
            "user-devices",
            "Thiết bị của tôi",
            "My devices",
            Some("Devices installed under your contracts"),
            "/portal/devices",
            "printer",
            vec![
                action("view", "Xem chi tiết", "View details", Some("eye")),
                action("report-issue", "Báo sự cố", "Report an issue", Some("alert")),
            ],
        ),
        item(
            "user-contracts",
            "Hợp đồng",
            "Contracts",
            None,
            "/portal/contracts",
            "file-text",
            vec![action("view", "Xem chi tiết", "View details", Some("eye"))],
        ),
        item(
            "user-consumables",
            "Vật tư tiêu hao",
            "Consumables",
            Some("Order consumables for your devices"),
            "/portal/consumables",
            "droplet",
            vec![
                action("view", "Xem chi tiết", "View details", Some("eye")),
                action("order", "Đặt hàng", "Place order", Some("cart")),
            ],
        ),
        item(
            "user-service-requests",
            "Yêu cầu dịch vụ",
            "Service requests",
            None,
            "/portal/service-requests",
            "wrench",
            vec![
                action("view", "Xem chi tiết", "View details", Some("eye")),
                action("create", "Thêm mới", "Create", Some("plus")),
            ],
        ),
    ]
});

/// Каталог для администраторов (SYSTEM)
pub fn system_catalog() -> &'static [NavigationItem] {
    &SYSTEM_CATALOG
}

/// Каталог для конечных пользователей клиента (USER)
pub fn user_catalog() -> &'static [NavigationItem] {
    &USER_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let actions = vec![
            action("view", "Xem", "View v1", None),
            action("edit", "Sửa", "Edit", None),
            action("view", "Xem", "View v2", None),
        ];
        let deduped = dedupe_actions(actions);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].label_en, "View v1");
    }

    #[test]
    fn user_catalog_ids_carry_user_prefix() {
        for item in user_catalog() {
            assert!(item.id.starts_with("user-"), "unexpected id {}", item.id);
        }
    }

    #[test]
    fn system_catalog_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for item in system_catalog() {
            assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
        }
    }

    #[test]
    fn localized_label_falls_back_to_base() {
        let mut it = item("x", "Nhãn", "English", None, "/x", "dot", vec![]);
        assert_eq!(it.localized_label(Locale::En), "English");
        it.label_en = String::new();
        assert_eq!(it.localized_label(Locale::En), "Nhãn");
    }
}
