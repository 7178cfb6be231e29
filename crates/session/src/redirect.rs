//! Redirect policy: given (session, profile, current path), where should the
//! user be sent?
//!
//! This module is pure. The stateful parts (the per-identity latch, the
//! settle delay, the grace period) live in the controller; this function is
//! also what the HTTP layer consults when a client asks "should I move?".

use brasa_auth::Role;

use crate::navigator::{NavState, ViewErrorKind};
use crate::routes;
use crate::state::SessionState;

/// A computed navigation target. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectIntent {
    pub path: String,
    pub state: Option<NavState>,
}

impl RedirectIntent {
    fn to(path: &str) -> Self {
        Self {
            path: path.to_string(),
            state: None,
        }
    }

    fn to_error(message: String) -> Self {
        Self {
            path: routes::ERROR_VIEW.to_string(),
            state: Some(NavState::Error {
                message,
                error_kind: ViewErrorKind::Error,
            }),
        }
    }
}

pub fn unrecognized_role_message(raw_role: &str) -> String {
    format!(
        "Rol de usuario no reconocido: '{raw_role}'. Por favor, contacta al administrador."
    )
}

pub fn profile_unavailable_message() -> String {
    "No se pudo cargar la información del usuario. Por favor, inicia sesión nuevamente."
        .to_string()
}

/// Compute the redirect, if any, for an authenticated user with a resolved
/// profile standing at `current_path`.
///
/// Policy:
/// - Auth-only pages send the user to their role's dashboard root; an
///   unrecognized role stays put (no guessing).
/// - A dashboard path outside the role's own prefix sends the user to their
///   own root; an unrecognized role goes to the error view, naming the value.
/// - Every other page (home, catalog, cart, static pages) never redirects.
///
/// Anonymous or still-loading states never produce an intent here; the
/// controller handles those phases (and the grace period) itself.
pub fn plan_redirect(state: &SessionState, current_path: &str) -> Option<RedirectIntent> {
    if state.loading {
        return None;
    }
    let (Some(_session), Some(profile)) = (&state.session, &state.profile) else {
        return None;
    };

    let role = profile.role();

    if routes::is_auth_page(current_path) {
        return match role {
            Some(role) => Some(RedirectIntent::to(routes::dashboard_home(role))),
            None => {
                tracing::debug!(rol = %profile.rol, "unrecognized role on auth page, staying put");
                None
            }
        };
    }

    if routes::is_dashboard_path(current_path) {
        return match role {
            Some(role) if routes::role_owns_path(role, current_path) => None,
            Some(role) => Some(RedirectIntent::to(routes::dashboard_home(role))),
            None => Some(RedirectIntent::to_error(unrecognized_role_message(
                &profile.rol,
            ))),
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use brasa_auth::{DocumentType, ProfileSeed, Session};
    use brasa_core::{SessionId, UserId};
    use chrono::{Duration, Utc};

    fn state_with_role(rol: &str) -> SessionState {
        let user_id = UserId::new();
        let now = Utc::now();
        let seed = ProfileSeed {
            nombre: "Luz".to_string(),
            apellido: "Cano".to_string(),
            tipo_documento: DocumentType::Cc,
            cedula: "43210".to_string(),
            telefono: None,
            direccion: None,
            departamento: None,
            pais: None,
        };
        let mut profile = seed.into_profile(user_id, now);
        profile.rol = rol.to_string();

        SessionState {
            session: Some(Session {
                id: SessionId::new(),
                user_id,
                token: "tok".to_string(),
                started_at: now,
                expires_at: now + Duration::hours(1),
            }),
            profile: Some(profile),
            loading: false,
        }
    }

    #[test]
    fn admin_on_login_goes_to_admin_dashboard() {
        let intent = plan_redirect(&state_with_role("admin"), "/login").unwrap();
        assert_eq!(intent.path, "/dashboard/admin");
        assert!(intent.state.is_none());
    }

    #[test]
    fn cliente_on_register_goes_to_cliente_dashboard() {
        let intent = plan_redirect(&state_with_role("cliente"), "/register").unwrap();
        assert_eq!(intent.path, "/dashboard/cliente");
    }

    #[test]
    fn cliente_on_admin_dashboard_is_sent_home() {
        let intent = plan_redirect(&state_with_role("cliente"), "/dashboard/admin").unwrap();
        assert_eq!(intent.path, "/dashboard/cliente");
    }

    #[test]
    fn matching_dashboard_never_redirects() {
        assert!(plan_redirect(&state_with_role("admin"), "/dashboard/admin").is_none());
        assert!(plan_redirect(&state_with_role("admin"), "/dashboard/admin/cupones").is_none());
        assert!(plan_redirect(&state_with_role("usuario"), "/dashboard/usuario/mi-perfil").is_none());
    }

    #[test]
    fn public_pages_never_redirect_authenticated_users() {
        for path in ["/", "/catalogo/arteestufas", "/carrito", "/contacto"] {
            assert!(plan_redirect(&state_with_role("admin"), path).is_none(), "{path}");
        }
    }

    #[test]
    fn unrecognized_role_on_dashboard_goes_to_error_with_role_named() {
        let intent = plan_redirect(&state_with_role(""), "/dashboard/usuario").unwrap();
        assert_eq!(intent.path, "/error");
        match intent.state.unwrap() {
            NavState::Error { message, error_kind } => {
                assert!(message.contains("''"));
                assert_eq!(error_kind, ViewErrorKind::Error);
            }
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_role_on_auth_page_stays_put() {
        assert!(plan_redirect(&state_with_role("gerente"), "/login").is_none());
    }

    #[test]
    fn anonymous_and_loading_states_produce_nothing() {
        let mut state = SessionState::new();
        assert!(plan_redirect(&state, "/login").is_none());

        state.loading = false;
        assert!(plan_redirect(&state, "/dashboard/admin").is_none());
    }
}
