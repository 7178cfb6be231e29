//! Route table for the storefront.
//!
//! Public pages (home, catalog, cart, static info pages) are intentionally
//! absent from the policy helpers: authenticated users browse them freely and
//! no automatic redirect ever fires there.

use brasa_auth::Role;

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const ERROR_VIEW: &str = "/error";

pub const DASHBOARD_PREFIX: &str = "/dashboard/";
pub const DASHBOARD_ADMIN: &str = "/dashboard/admin";
pub const DASHBOARD_CLIENTE: &str = "/dashboard/cliente";
pub const DASHBOARD_USUARIO: &str = "/dashboard/usuario";

/// Dashboard root for a role.
pub fn dashboard_home(role: Role) -> &'static str {
    match role {
        Role::Admin => DASHBOARD_ADMIN,
        Role::Cliente => DASHBOARD_CLIENTE,
        Role::Usuario => DASHBOARD_USUARIO,
    }
}

/// Sign-in / sign-up pages: the only public pages authenticated users are
/// redirected away from.
pub fn is_auth_page(path: &str) -> bool {
    path == LOGIN || path == REGISTER
}

pub fn is_dashboard_path(path: &str) -> bool {
    path.starts_with(DASHBOARD_PREFIX)
}

/// Whether `path` falls under the dashboard prefix owned by `role`.
///
/// Ownership is exact per role; the usuario/cliente overlap applies only to
/// the route gate allowlist (see [`allowed_roles`]), not to redirect routing.
pub fn role_owns_path(role: Role, path: &str) -> bool {
    path.starts_with(dashboard_home(role))
}

/// Gate allowlist for a protected path, if the path is protected at all.
///
/// The usuario dashboard additionally admits `cliente`: clients keep access
/// to the general-user views.
pub fn allowed_roles(path: &str) -> Option<&'static [Role]> {
    if path.starts_with(DASHBOARD_ADMIN) {
        Some(&[Role::Admin])
    } else if path.starts_with(DASHBOARD_CLIENTE) {
        Some(&[Role::Cliente])
    } else if path.starts_with(DASHBOARD_USUARIO) {
        Some(&[Role::Usuario, Role::Cliente])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_homes_map_one_to_one() {
        assert_eq!(dashboard_home(Role::Admin), "/dashboard/admin");
        assert_eq!(dashboard_home(Role::Cliente), "/dashboard/cliente");
        assert_eq!(dashboard_home(Role::Usuario), "/dashboard/usuario");
    }

    #[test]
    fn auth_pages_are_exactly_login_and_register() {
        assert!(is_auth_page("/login"));
        assert!(is_auth_page("/register"));
        assert!(!is_auth_page("/"));
        assert!(!is_auth_page("/carrito"));
    }

    #[test]
    fn path_ownership_is_prefix_based() {
        assert!(role_owns_path(Role::Admin, "/dashboard/admin"));
        assert!(role_owns_path(Role::Admin, "/dashboard/admin/cupones"));
        assert!(!role_owns_path(Role::Admin, "/dashboard/cliente"));
        assert!(!role_owns_path(Role::Cliente, "/dashboard/admin"));
    }

    #[test]
    fn usuario_dashboard_admits_cliente() {
        let allowed = allowed_roles("/dashboard/usuario/mis-cotizaciones").unwrap();
        assert!(allowed.contains(&Role::Usuario));
        assert!(allowed.contains(&Role::Cliente));

        let admin_only = allowed_roles("/dashboard/admin").unwrap();
        assert_eq!(admin_only, &[Role::Admin]);
    }

    #[test]
    fn public_paths_have_no_allowlist() {
        assert!(allowed_roles("/").is_none());
        assert!(allowed_roles("/catalogo/arteestufas").is_none());
        assert!(allowed_roles("/login").is_none());
    }
}
