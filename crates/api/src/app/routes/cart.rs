use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;

use brasa_cart::AppliedDiscount;
use brasa_core::{ProductId, QuoteId};
use brasa_quotes::{QuoteDraft, QuoteItem, QuoteRequest};

use crate::app::dto::{
    self, CartAddRequest, CartQuantityRequest, DiscountCodeRequest, QuoteSubmitRequest,
};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_cart).delete(clear_cart))
        .route("/items", post(add_item))
        .route("/items/:producto_id", put(update_item).delete(remove_item))
        .route("/descuento", post(apply_discount).delete(remove_discount))
        .route("/cotizacion", post(submit_quote))
}

pub async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let cart = services.carts.load(session.user_id());
    (StatusCode::OK, Json(dto::cart_to_json(&cart))).into_response()
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<CartAddRequest>,
) -> axum::response::Response {
    let producto_id: ProductId = match body.producto_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de producto inválido")
        }
    };

    let Some(product) = services.products.get(&producto_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "producto no encontrado");
    };

    let user_id = session.user_id();
    let mut cart = services.carts.load(user_id);
    cart.add(product, body.cantidad);
    services.carts.save(user_id, &cart);

    (StatusCode::OK, Json(dto::cart_to_json(&cart))).into_response()
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(producto_id): Path<String>,
    Json(body): Json<CartQuantityRequest>,
) -> axum::response::Response {
    let producto_id: ProductId = match producto_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de producto inválido")
        }
    };

    let user_id = session.user_id();
    let mut cart = services.carts.load(user_id);
    cart.update_quantity(producto_id, body.cantidad);
    services.carts.save(user_id, &cart);

    (StatusCode::OK, Json(dto::cart_to_json(&cart))).into_response()
}

pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(producto_id): Path<String>,
) -> axum::response::Response {
    let producto_id: ProductId = match producto_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de producto inválido")
        }
    };

    let user_id = session.user_id();
    let mut cart = services.carts.load(user_id);
    cart.remove(producto_id);
    services.carts.save(user_id, &cart);

    (StatusCode::OK, Json(dto::cart_to_json(&cart))).into_response()
}

pub async fn clear_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    services.carts.clear(session.user_id());
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "mensaje": "Todos los elementos han sido eliminados del carrito.",
        })),
    )
        .into_response()
}

pub async fn apply_discount(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
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

    let user_id = session.user_id();
    let mut cart = services.carts.load(user_id);
    cart.apply_discount(AppliedDiscount::from_coupon(&coupon));
    services.carts.save(user_id, &cart);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "mensaje": "¡Código aplicado!",
            "carrito": dto::cart_to_json(&cart),
        })),
    )
        .into_response()
}

pub async fn remove_discount(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let user_id = session.user_id();
    let mut cart = services.carts.load(user_id);
    cart.remove_discount();
    services.carts.save(user_id, &cart);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "mensaje": "El código de descuento ha sido removido.",
            "carrito": dto::cart_to_json(&cart),
        })),
    )
        .into_response()
}

/// Turn the cart into a quote request. Consumes the applied coupon's use and
/// clears the cart on success.
pub async fn submit_quote(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<QuoteSubmitRequest>,
) -> axum::response::Response {
    let user_id = session.user_id();
    let cart = services.carts.load(user_id);

    let items = cart
        .lines
        .iter()
        .map(|line| QuoteItem {
            producto_id: line.product.id,
            cantidad: line.cantidad,
        })
        .collect::<Vec<_>>();

    let draft = QuoteDraft {
        direccion_envio: body.direccion_envio,
        departamento: body.departamento,
        comentarios_adicionales: body.comentarios_adicionales,
    };

    let quote = match QuoteRequest::submit(QuoteId::new(), user_id, draft, items, Utc::now()) {
        Ok(quote) => quote,
        Err(err) => return errors::domain_error_to_response(err),
    };

    // Consume the coupon before committing the quote; an invalid coupon
    // aborts the submission so the user can fix the cart.
    if let Some(discount) = &cart.discount {
        let Some(mut coupon) = services.coupons.find_by_code(&discount.codigo) else {
            return errors::json_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "cupon_invalido",
                "El código de descuento no es válido o ha expirado.",
            );
        };
        if let Err(err) = coupon.redeem(Utc::now()) {
            return errors::json_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "cupon_invalido",
                errors::coupon_rejection_message(&err),
            );
        }
        if let Err(err) = services.coupons.update(coupon) {
            return errors::domain_error_to_response(err);
        }
    }

    let id = quote.id;
    if let Err(err) = services.quotes.insert(quote) {
        return errors::domain_error_to_response(err);
    }
    services.carts.clear(user_id);

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": id.to_string(),
            "mensaje": "Tu cotización ha sido enviada exitosamente. Te contactaremos pronto.",
        })),
    )
        .into_response()
}
