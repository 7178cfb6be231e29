use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use brasa_core::CouponId;
use brasa_coupons::{Coupon, DiscountKind};

use crate::app::dto::{self, CouponRequest, DiscountCodeRequest};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

/// Public validation used by the cart's discount form.
pub async fn validate_code(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<DiscountCodeRequest>,
) -> axum::response::Response {
    let Some(coupon) = services.coupons.find_by_code(&body.codigo) else {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "cupon_invalido",
            "El código de descuento no es válido o ha expirado.",
        );
    };

    if let Err(err) = coupon.validate_for_redeem(Utc::now()) {
        return errors::json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "cupon_invalido",
            errors::coupon_rejection_message(&err),
        );
    }

    let mensaje = match coupon.tipo_descuento {
        DiscountKind::Porcentaje => {
            format!("Descuento del {}% aplicado correctamente", coupon.valor)
        }
        DiscountKind::Fijo => format!(
            "Descuento de {} aplicado correctamente",
            brasa_core::Price::from_cents(coupon.valor)
        ),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "valido": true,
            "codigo": coupon.codigo,
            "tipo_descuento": coupon.tipo_descuento,
            "valor": coupon.valor,
            "mensaje": mensaje,
        })),
    )
        .into_response()
}

// Admin handlers, mounted under /dashboard/admin/cupones.

pub async fn list_coupons(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .coupons
        .list_newest_first()
        .iter()
        .map(dto::coupon_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_coupon(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<CouponRequest>,
) -> axum::response::Response {
    let coupon = match Coupon::create(
        CouponId::new(),
        body.into_draft(),
        session.user_id(),
        Utc::now(),
    ) {
        Ok(coupon) => coupon,
        Err(err) => return errors::domain_error_to_response(err),
    };

    let id = coupon.id;
    if let Err(err) = services.coupons.insert(coupon) {
        return errors::domain_error_to_response(err);
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": id.to_string(),
            "mensaje": "El cupón se ha creado exitosamente.",
        })),
    )
        .into_response()
}

pub async fn update_coupon(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<CouponRequest>,
) -> axum::response::Response {
    let id: CouponId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de cupón inválido")
        }
    };

    let Some(mut coupon) = services.coupons.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "cupón no encontrado");
    };

    if let Err(err) = coupon.apply_update(body.into_draft(), Utc::now()) {
        return errors::domain_error_to_response(err);
    }
    if let Err(err) = services.coupons.update(coupon) {
        return errors::domain_error_to_response(err);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "id": id.to_string(),
            "mensaje": "El cupón se ha actualizado exitosamente.",
        })),
    )
        .into_response()
}

pub async fn delete_coupon(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CouponId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de cupón inválido")
        }
    };

    match services.coupons.delete(&id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "mensaje": "El cupón se ha eliminado exitosamente.",
            })),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn toggle_coupon(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CouponId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de cupón inválido")
        }
    };

    let Some(mut coupon) = services.coupons.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "cupón no encontrado");
    };

    coupon.toggle_status(Utc::now());
    let estado = coupon.estado;
    if let Err(err) = services.coupons.update(coupon) {
        return errors::domain_error_to_response(err);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "estado": estado,
            "mensaje": "El estado del cupón se ha actualizado.",
        })),
    )
        .into_response()
}
