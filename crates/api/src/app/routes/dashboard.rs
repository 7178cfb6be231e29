//! Role-scoped dashboard route trees. The role gate middleware wraps each
//! router at wiring time; handlers can assume an admitted role.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;

use brasa_core::QuoteId;
use brasa_quotes::{Job, QuoteStatus};

use crate::app::dto::{self, QuoteStatusRequest};
use crate::app::errors;
use crate::app::routes::{catalog, coupons};
use crate::app::services::AppServices;
use crate::context::{ProfileContext, SessionContext};

pub fn admin_router() -> Router {
    Router::new()
        .route("/resumen", get(admin_summary))
        .route(
            "/productos",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route(
            "/productos/:id",
            put(catalog::update_product).delete(catalog::delete_product),
        )
        .route("/cotizaciones", get(list_all_quotes))
        .route("/cotizaciones/:id/estado", put(update_quote_status))
        .route("/trabajos", get(list_contracted_jobs))
        .route("/usuarios", get(list_users))
        .route(
            "/cupones",
            get(coupons::list_coupons).post(coupons::create_coupon),
        )
        .route(
            "/cupones/:id",
            put(coupons::update_coupon).delete(coupons::delete_coupon),
        )
        .route(
            "/cupones/:id/estado",
            axum::routing::post(coupons::toggle_coupon),
        )
}

pub fn cliente_router() -> Router {
    Router::new()
        .route("/resumen", get(own_summary))
        .route("/mis-cotizaciones", get(my_quotes))
        .route("/mi-perfil", get(my_profile))
}

pub fn usuario_router() -> Router {
    Router::new()
        .route("/resumen", get(own_summary))
        .route("/mis-cotizaciones", get(my_quotes))
        .route("/mi-perfil", get(my_profile))
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin
// ─────────────────────────────────────────────────────────────────────────────

/// Dashboard tiles plus recent activity.
pub async fn admin_summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let recientes = services
        .quotes
        .list_newest_first()
        .iter()
        .take(5)
        .map(|q| dto::quote_to_json(q, &services, true))
        .collect::<Vec<_>>();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "productos": services.products.count(),
            "usuarios": services.profiles.count(),
            "cotizaciones": services.quotes.count(),
            "trabajos": services
                .quotes
                .count_with_status(QuoteStatus::TrabajoContratado),
            "actividad_reciente": recientes,
        })),
    )
        .into_response()
}

pub async fn list_all_quotes(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .quotes
        .list_newest_first()
        .iter()
        .map(|q| dto::quote_to_json(q, &services, true))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn update_quote_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<QuoteStatusRequest>,
) -> axum::response::Response {
    let id: QuoteId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de cotización inválido")
        }
    };

    let Some(estado) = QuoteStatus::parse(&body.estado) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "estado_invalido", "estado inválido");
    };

    let Some(mut quote) = services.quotes.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "cotización no encontrada");
    };

    if let Err(err) = quote.set_status(estado, Utc::now()) {
        return errors::domain_error_to_response(err);
    }
    if let Err(err) = services.quotes.update(quote.clone()) {
        return errors::domain_error_to_response(err);
    }

    // Contracting spawns the 1:1 job record.
    if estado == QuoteStatus::TrabajoContratado {
        let job = Job::assign(quote.id, body.observaciones, Utc::now());
        if let Err(err) = services.jobs.insert(job) {
            tracing::warn!(cotizacion_id = %quote.id, error = %err, "job already assigned");
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "cotizacion": dto::quote_to_json(&quote, &services, true),
            "mensaje": "El estado de la cotización ha sido actualizado correctamente.",
        })),
    )
        .into_response()
}

pub async fn list_contracted_jobs(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .quotes
        .list_newest_first()
        .iter()
        .filter(|q| q.is_contracted())
        .map(|q| {
            serde_json::json!({
                "cotizacion": dto::quote_to_json(q, &services, true),
                "trabajo": services.jobs.get_by_quote(&q.id).map(|j| dto::job_to_json(&j)),
            })
        })
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .profiles
        .list_newest_first()
        .iter()
        .map(dto::profile_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Cliente / usuario
// ─────────────────────────────────────────────────────────────────────────────

pub async fn own_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let count = services.quotes.list_for_user(session.user_id()).len();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "cotizaciones": count })),
    )
        .into_response()
}

pub async fn my_quotes(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services
        .quotes
        .list_for_user(session.user_id())
        .iter()
        .map(|q| dto::quote_to_json(q, &services, false))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn my_profile(
    Extension(profile): Extension<ProfileContext>,
) -> axum::response::Response {
    match profile.profile() {
        Some(profile) => (StatusCode::OK, Json(dto::profile_to_json(profile))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "perfil no encontrado"),
    }
}
