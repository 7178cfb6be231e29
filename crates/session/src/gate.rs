//! Route gate: per-view role enforcement.
//!
//! The gate re-validates on every render, independently of the redirect
//! guard (defense in depth). It reads the shared state and decides; it never
//! mutates session or profile and side-effects only through the navigation
//! its caller performs.

use brasa_auth::Role;

use crate::navigator::{NavState, ViewErrorKind};
use crate::state::SessionState;

/// Which placeholder to show while a decision cannot be made yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingKind {
    /// The initial session resolution has not completed.
    Session,
    /// A session exists but its profile has not been resolved yet.
    Profile,
}

/// Outcome of gating one render of a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    RenderChildren,
    RenderLoading(LoadingKind),
    RedirectToLogin { state: NavState },
    RedirectToError { state: NavState },
}

pub fn access_denied_message(raw_role: &str) -> String {
    format!("No tienes permisos para acceder a esta sección. Tu rol actual es: {raw_role}")
}

/// Decide whether the subtree behind this gate may render.
pub fn decide(state: &SessionState, allowed_roles: &[Role], current_path: &str) -> GateDecision {
    if state.loading {
        return GateDecision::RenderLoading(LoadingKind::Session);
    }

    if state.session.is_none() {
        return GateDecision::RedirectToLogin {
            state: NavState::From {
                path: current_path.to_string(),
            },
        };
    }

    let Some(profile) = &state.profile else {
        return GateDecision::RenderLoading(LoadingKind::Profile);
    };

    let allowed = profile
        .role()
        .is_some_and(|role| allowed_roles.contains(&role));
    if !allowed {
        tracing::debug!(rol = %profile.rol, ?allowed_roles, "role not allowed for gated view");
        return GateDecision::RedirectToError {
            state: NavState::Error {
                message: access_denied_message(&profile.rol),
                error_kind: ViewErrorKind::Unauthorized,
            },
        };
    }

    GateDecision::RenderChildren
}

#[cfg(test)]
mod tests {
    use super::*;
    use brasa_auth::{DocumentType, ProfileSeed, Session};
    use brasa_core::{SessionId, UserId};
    use chrono::{Duration, Utc};

    fn authenticated(rol: &str, with_profile: bool) -> SessionState {
        let user_id = UserId::new();
        let now = Utc::now();
        let profile = with_profile.then(|| {
            let seed = ProfileSeed {
                nombre: "Iván".to_string(),
                apellido: "Mora".to_string(),
                tipo_documento: DocumentType::Cc,
                cedula: "998877".to_string(),
                telefono: None,
                direccion: None,
                departamento: None,
                pais: None,
            };
            let mut profile = seed.into_profile(user_id, now);
            profile.rol = rol.to_string();
            profile
        });

        SessionState {
            session: Some(Session {
                id: SessionId::new(),
                user_id,
                token: "tok".to_string(),
                started_at: now,
                expires_at: now + Duration::hours(1),
            }),
            profile,
            loading: false,
        }
    }

    #[test]
    fn loading_renders_placeholder_without_redirect() {
        let state = SessionState::new();
        let decision = decide(&state, &[Role::Admin], "/dashboard/admin");
        assert_eq!(decision, GateDecision::RenderLoading(LoadingKind::Session));
    }

    #[test]
    fn anonymous_visit_redirects_to_login_preserving_location() {
        let mut state = SessionState::new();
        state.loading = false;

        let decision = decide(&state, &[Role::Admin], "/dashboard/admin/cupones");
        match decision {
            GateDecision::RedirectToLogin {
                state: NavState::From { path },
            } => assert_eq!(path, "/dashboard/admin/cupones"),
            other => panic!("expected login redirect, got {other:?}"),
        }
    }

    #[test]
    fn profile_pending_renders_profile_placeholder() {
        let state = authenticated("admin", false);
        let decision = decide(&state, &[Role::Admin], "/dashboard/admin");
        assert_eq!(decision, GateDecision::RenderLoading(LoadingKind::Profile));
    }

    #[test]
    fn wrong_role_redirects_to_error_naming_the_role() {
        let state = authenticated("usuario", true);
        let decision = decide(&state, &[Role::Admin], "/dashboard/admin");
        match decision {
            GateDecision::RedirectToError {
                state: NavState::Error { message, error_kind },
            } => {
                assert!(message.contains("usuario"));
                assert_eq!(error_kind, ViewErrorKind::Unauthorized);
            }
            other => panic!("expected error redirect, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_role_is_never_admitted() {
        let state = authenticated("", true);
        let decision = decide(&state, &[Role::Admin, Role::Cliente, Role::Usuario], "/dashboard/admin");
        assert!(matches!(decision, GateDecision::RedirectToError { .. }));
    }

    #[test]
    fn allowed_role_renders_children() {
        let state = authenticated("admin", true);
        let decision = decide(&state, &[Role::Admin], "/dashboard/admin");
        assert_eq!(decision, GateDecision::RenderChildren);
    }

    #[test]
    fn cliente_is_admitted_where_allowlisted() {
        let state = authenticated("cliente", true);
        let decision = decide(&state, &[Role::Usuario, Role::Cliente], "/dashboard/usuario");
        assert_eq!(decision, GateDecision::RenderChildren);
    }
}
