use super::catalog::{Catalogs, NavigationConfigItem, NavigationItem};
use crate::domain::a001_customer::Customer;
use crate::domain::a002_role::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Какой каталог применяется: SYSTEM (администраторы) или USER
/// (конечные пользователи клиента). Это же значение используется
/// как явный `defaultNavMode`, когда клиент не выбран.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    #[default]
    System,
    User,
}

/// Роли, доступные для выбора в области не-системного клиента
const CUSTOMER_SCOPE_ROLES: [&str; 2] = ["manager", "user"];

/// Определить применимый каталог по области действия.
///
/// - Клиент не выбран — решает явный режим.
/// - Клиент с кодом "SYS" — всегда SYSTEM, независимо от режима и роли.
/// - Любой другой (в том числе не найденный в списке) — USER.
///   Ненайденный id — это fallback-политика, а не ошибка.
pub fn resolve_catalog_kind(
    customer_id: Option<Uuid>,
    customers: &[Customer],
    explicit_mode: CatalogKind,
) -> CatalogKind {
    let Some(customer_id) = customer_id else {
        return explicit_mode;
    };
    let found = customers.iter().find(|c| c.base.id.value() == customer_id);
    match found {
        Some(c) if c.is_system() => CatalogKind::System,
        _ => CatalogKind::User,
    }
}

/// То же, но сразу возвращает список пунктов из пары каталогов
pub fn resolve_catalog<'a>(
    catalogs: &'a Catalogs,
    customer_id: Option<Uuid>,
    customers: &[Customer],
    explicit_mode: CatalogKind,
) -> &'a [NavigationItem] {
    match resolve_catalog_kind(customer_id, customers, explicit_mode) {
        CatalogKind::System => &catalogs.system,
        CatalogKind::User => &catalogs.user,
    }
}

/// Вывести режим по умолчанию из пунктов загруженной конфигурации:
/// если встречается id с префиксом "user-" — это USER-конфигурация
pub fn infer_default_mode(existing_items: Option<&[NavigationConfigItem]>) -> CatalogKind {
    match existing_items {
        Some(items) if items.iter().any(|i| i.id.starts_with("user-")) => CatalogKind::User,
        _ => CatalogKind::System,
    }
}

/// Роли, доступные для выбора в данной области.
///
/// Для не-глобального, не-системного клиента выбор ограничен ролями
/// "manager" и "user" (сравнение по нормализованному имени).
/// Пустой список ролей деградирует в "нет доступных ролей".
pub fn assignable_roles(customer: Option<&Customer>, roles: &[Role]) -> Vec<Role> {
    match customer {
        Some(c) if !c.is_system() => roles
            .iter()
            .filter(|r| CUSTOMER_SCOPE_ROLES.contains(&r.normalized_name().as_str()))
            .cloned()
            .collect(),
        _ => roles.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::navigation::catalog::system_catalog;

    fn customer(code: &str) -> Customer {
        Customer::new_for_insert(code.into(), format!("Customer {code}"), None)
    }

    fn role(name: &str) -> Role {
        Role::new_for_insert(format!("R-{name}"), name.into(), None)
    }

    #[test]
    fn sys_customer_overrides_explicit_mode() {
        let sys = customer("SYS");
        let id = sys.base.id.value();
        let kind = resolve_catalog_kind(Some(id), &[sys], CatalogKind::User);
        assert_eq!(kind, CatalogKind::System);
    }

    #[test]
    fn unknown_customer_falls_back_to_user_catalog() {
        let kind = resolve_catalog_kind(Some(Uuid::new_v4()), &[], CatalogKind::System);
        assert_eq!(kind, CatalogKind::User);
    }

    #[test]
    fn no_customer_uses_explicit_mode() {
        assert_eq!(
            resolve_catalog_kind(None, &[], CatalogKind::User),
            CatalogKind::User
        );
        assert_eq!(
            resolve_catalog_kind(None, &[], CatalogKind::System),
            CatalogKind::System
        );
    }

    #[test]
    fn resolve_catalog_returns_matching_slice() {
        let catalogs = Catalogs::builtin();
        let items = resolve_catalog(&catalogs, None, &[], CatalogKind::System);
        assert_eq!(items, system_catalog());
    }

    #[test]
    fn infer_default_mode_from_item_ids() {
        let catalogs = Catalogs::builtin();
        let user_item = &catalogs.user[0];
        let system_item = &catalogs.system[0];

        assert_eq!(
            infer_default_mode(Some(std::slice::from_ref(user_item))),
            CatalogKind::User
        );
        assert_eq!(
            infer_default_mode(Some(std::slice::from_ref(system_item))),
            CatalogKind::System
        );
        assert_eq!(infer_default_mode(Some(&[])), CatalogKind::System);
        assert_eq!(infer_default_mode(None), CatalogKind::System);
    }

    #[test]
    fn non_sys_customer_restricts_roles_to_manager_and_user() {
        let acme = customer("ACME");
        let roles = vec![role("Admin"), role("  Manager "), role("User")];
        let assignable = assignable_roles(Some(&acme), &roles);
        let names: Vec<String> = assignable.iter().map(|r| r.normalized_name()).collect();
        assert_eq!(names, vec!["manager", "user"]);
    }

    #[test]
    fn sys_and_global_scopes_keep_all_roles() {
        let sys = customer("SYS");
        let roles = vec![role("Admin"), role("Manager")];
        assert_eq!(assignable_roles(Some(&sys), &roles).len(), 2);
        assert_eq!(assignable_roles(None, &roles).len(), 2);
    }

    #[test]
    fn role_filter_tolerates_empty_list() {
        let acme = customer("ACME");
        assert!(assignable_roles(Some(&acme), &[]).is_empty());
    }
}
