use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use brasa_auth::{AuthProvider, Credentials, ProfileSeed, ProfileStore, SignUpOutcome};
use brasa_session::{redirect, routes as route_table, SessionState};

use crate::app::dto::{self, LoginRequest, RedirectQuery, RegisterRequest};
use crate::app::errors::{self, AuthFlow};
use crate::app::services::AppServices;
use crate::context::{ProfileContext, SessionContext};

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RegisterRequest>,
) -> axum::response::Response {
    let credentials = Credentials::new(body.email, body.password);
    let seed = ProfileSeed {
        nombre: body.nombre,
        apellido: body.apellido,
        tipo_documento: body.tipo_documento,
        cedula: body.cedula,
        telefono: body.telefono,
        direccion: body.direccion,
        departamento: body.departamento,
        pais: body.pais,
    };

    if let Err(err) = seed.validate() {
        return errors::domain_error_to_response(err);
    }

    match services.auth.sign_up(&credentials, &seed) {
        Ok(SignUpOutcome::SignedIn(session)) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "token": session.token,
                "user_id": session.user_id.to_string(),
                "mensaje": "Tu cuenta ha sido creada correctamente.",
            })),
        )
            .into_response(),
        Ok(SignUpOutcome::ConfirmationPending) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "pendiente_confirmacion": true,
                "mensaje": "Por favor verifica tu correo electrónico para completar el registro.",
            })),
        )
            .into_response(),
        Err(err) => errors::auth_error_to_response(&err, AuthFlow::SignUp),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let credentials = Credentials::new(body.email, body.password);

    let session = match services.auth.sign_in(&credentials) {
        Ok(session) => session,
        Err(err) => return errors::auth_error_to_response(&err, AuthFlow::SignIn),
    };

    let profile = services
        .profiles
        .profile_by_identity(session.user_id)
        .ok()
        .flatten();
    let home = profile
        .as_ref()
        .and_then(|p| p.role())
        .map(route_table::dashboard_home);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "token": session.token,
            "user_id": session.user_id.to_string(),
            "rol": profile.as_ref().map(|p| p.rol.clone()),
            "home": home,
            "mensaje": "Has iniciado sesión correctamente.",
        })),
    )
        .into_response()
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    services.auth.revoke_token(session.token());
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "mensaje": "Has cerrado sesión correctamente.",
        })),
    )
        .into_response()
}

pub async fn session_info(
    Extension(session): Extension<SessionContext>,
    Extension(profile): Extension<ProfileContext>,
) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "user_id": session.user_id().to_string(),
            "expira": session.session().expires_at,
            "perfil": profile.profile().map(dto::profile_to_json),
        })),
    )
        .into_response()
}

/// Evaluate the redirect policy for the caller's state at a given path.
///
/// Thin clients call this instead of re-implementing the routing table; the
/// grace-period timing stays client-side, so an unresolved profile is
/// reported as pending rather than decided here.
pub async fn redirect_check(
    Extension(session): Extension<SessionContext>,
    Extension(profile): Extension<ProfileContext>,
    Query(query): Query<RedirectQuery>,
) -> axum::response::Response {
    let state = SessionState {
        session: Some(session.session().clone()),
        profile: profile.profile().cloned(),
        loading: false,
    };

    let body = match redirect::plan_redirect(&state, &query.path) {
        Some(intent) => serde_json::json!({
            "redirige": true,
            "destino": intent.path,
            "estado": intent.state,
        }),
        None => serde_json::json!({
            "redirige": false,
            "perfil_pendiente": state.profile.is_none(),
        }),
    };

    (StatusCode::OK, Json(body)).into_response()
}
