//! Navigation configuration core
//!
//! Чистая логика конфигурации навигации: каталоги пунктов меню,
//! разрешение области действия (клиент/роль), модель включённости
//! и сессия редактирования. Без I/O — всё состояние живёт в памяти
//! одной сессии формы.

pub mod catalog;
pub mod enablement;
pub mod scope;
pub mod session;

pub use catalog::{
    dedupe_actions, Catalogs, Locale, NavigationAction, NavigationConfigItem, NavigationItem,
};
pub use enablement::EnablementModel;
pub use scope::{assignable_roles, infer_default_mode, resolve_catalog, resolve_catalog_kind, CatalogKind};
pub use session::AuthoringSession;
