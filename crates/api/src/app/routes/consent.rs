use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::app::dto::ConsentRequest;
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn record_consent(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<ConsentRequest>,
) -> axum::response::Response {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let record = services
        .consents
        .record(body.decision, ip, user_agent, body.sesion_hash, Utc::now());

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": record.id.to_string(),
            "decision": record.decision,
            "fecha_hora": record.fecha_hora,
        })),
    )
        .into_response()
}

pub async fn latest_consent(
    Extension(services): Extension<Arc<AppServices>>,
    Path(sesion_hash): Path<String>,
) -> axum::response::Response {
    match services.consents.latest_for_session(&sesion_hash) {
        Some(record) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "decision": record.decision,
                "fecha_hora": record.fecha_hora,
            })),
        )
            .into_response(),
        None => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "sin decisión registrada para esta sesión",
        ),
    }
}
