use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use brasa_auth::{ProfileStore, Role};
use brasa_session::{gate, GateDecision, LoadingKind, NavState, SessionState};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::{ProfileContext, SessionContext};

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

/// Resolve the bearer token into session + profile request extensions.
///
/// A profile-fetch failure degrades to an absent profile; the role gate
/// decides what that means for the route.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let session = state
        .services
        .auth
        .session_for_token(token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let profile = match state.services.profiles.profile_by_identity(session.user_id) {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!(user_id = %session.user_id, error = %err, "profile fetch failed");
            None
        }
    };

    req.extensions_mut().insert(SessionContext::new(session));
    req.extensions_mut().insert(ProfileContext::new(profile));

    Ok(next.run(req).await)
}

/// Role allowlist for one dashboard subtree.
#[derive(Clone, Copy)]
pub struct GateState {
    pub allowed: &'static [Role],
}

/// Enforce the route gate on every request under a protected subtree.
/// Runs after `auth_middleware`, so the session context is present.
pub async fn role_gate(
    State(state): State<GateState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let session = req
        .extensions()
        .get::<SessionContext>()
        .map(|c| c.session().clone());
    let profile = req
        .extensions()
        .get::<ProfileContext>()
        .and_then(|c| c.profile().cloned());
    let path = req.uri().path().to_string();

    let session_state = SessionState {
        session,
        profile,
        loading: false,
    };

    match gate::decide(&session_state, state.allowed, &path) {
        GateDecision::RenderChildren => next.run(req).await,
        GateDecision::RenderLoading(LoadingKind::Profile) => errors::json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "perfil_no_resuelto",
            "La información del usuario aún no está disponible. Intenta nuevamente.",
        ),
        GateDecision::RenderLoading(LoadingKind::Session) => errors::json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "sesion_no_resuelta",
            "La sesión aún no está disponible. Intenta nuevamente.",
        ),
        GateDecision::RedirectToLogin { state } => {
            let from = match state {
                NavState::From { path } => path,
                _ => String::new(),
            };
            errors::json_error_with_redirect(
                StatusCode::UNAUTHORIZED,
                "no_autenticado",
                "Debes iniciar sesión para acceder a esta sección.",
                "/login",
                Some(from),
            )
        }
        GateDecision::RedirectToError { state } => {
            let message = match state {
                NavState::Error { message, .. } => message,
                _ => "Acceso denegado.".to_string(),
            };
            errors::json_error_with_redirect(
                StatusCode::FORBIDDEN,
                "rol_no_autorizado",
                message,
                "/error",
                None,
            )
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
