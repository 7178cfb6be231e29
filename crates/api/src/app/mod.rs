//! HTTP application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: store/provider wiring shared by every handler
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use brasa_auth::Role;

use crate::middleware::{self, AuthState, GateState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    let auth_state = AuthState {
        services: services.clone(),
    };

    let public = Router::new()
        .route("/health", get(routes::system::health))
        .route(
            "/catalogo/productos",
            get(routes::catalog::list_products),
        )
        .route(
            "/catalogo/productos/:id",
            get(routes::catalog::get_product),
        )
        .route(
            "/consentimientos",
            axum::routing::post(routes::consent::record_consent),
        )
        .route(
            "/consentimientos/:sesion_hash",
            get(routes::consent::latest_consent),
        )
        .route(
            "/cupones/validar",
            axum::routing::post(routes::coupons::validate_code),
        )
        .route("/auth/registro", axum::routing::post(routes::auth::register))
        .route("/auth/login", axum::routing::post(routes::auth::login));

    // Protected routes: bearer session + resolved profile.
    let protected = Router::new()
        .route("/auth/logout", axum::routing::post(routes::auth::logout))
        .route("/auth/sesion", get(routes::auth::session_info))
        .route("/auth/redirige", get(routes::auth::redirect_check))
        .route("/stream", get(routes::stream::stream))
        .nest("/carrito", routes::cart::router())
        .nest(
            "/dashboard/admin",
            routes::dashboard::admin_router().layer(axum::middleware::from_fn_with_state(
                GateState {
                    allowed: &[Role::Admin],
                },
                middleware::role_gate,
            )),
        )
        .nest(
            "/dashboard/cliente",
            routes::dashboard::cliente_router().layer(axum::middleware::from_fn_with_state(
                GateState {
                    allowed: &[Role::Cliente],
                },
                middleware::role_gate,
            )),
        )
        .nest(
            "/dashboard/usuario",
            routes::dashboard::usuario_router().layer(axum::middleware::from_fn_with_state(
                GateState {
                    allowed: &[Role::Usuario, Role::Cliente],
                },
                middleware::role_gate,
            )),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
