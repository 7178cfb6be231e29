use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use brasa_catalog::Product;
use brasa_core::ProductId;

use crate::app::dto::{self, ProductRequest};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .products
        .list_newest_first()
        .iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de producto inválido")
        }
    };
    match services.products.get(&id) {
        Some(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "producto no encontrado"),
    }
}

// Admin handlers, mounted under /dashboard/admin/productos.

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<ProductRequest>,
) -> axum::response::Response {
    let product = match Product::create(
        ProductId::new(),
        body.into_draft(),
        session.user_id(),
        Utc::now(),
    ) {
        Ok(product) => product,
        Err(err) => return errors::domain_error_to_response(err),
    };

    let id = product.id;
    if let Err(err) = services.products.insert(product) {
        return errors::domain_error_to_response(err);
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": id.to_string(),
            "mensaje": "El producto se ha creado exitosamente.",
        })),
    )
        .into_response()
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<ProductRequest>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de producto inválido")
        }
    };

    let Some(mut product) = services.products.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "producto no encontrado");
    };

    if let Err(err) = product.apply_update(body.into_draft(), Utc::now()) {
        return errors::domain_error_to_response(err);
    }
    if let Err(err) = services.products.update(product) {
        return errors::domain_error_to_response(err);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "id": id.to_string(),
            "mensaje": "El producto se ha actualizado exitosamente.",
        })),
    )
        .into_response()
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "id de producto inválido")
        }
    };

    match services.products.delete(&id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "mensaje": "El producto se ha eliminado exitosamente.",
            })),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
