use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use brasa_auth::AuthError;
use brasa_core::DomainError;
use brasa_coupons::CouponError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Error response that also tells the client where to go, mirroring the
/// storefront's redirect-carrying navigation states.
pub fn json_error_with_redirect(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    redirect: &'static str,
    from: Option<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
            "redirect": redirect,
            "from": from,
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized"),
    }
}

/// Distinguishes sign-in from sign-up when mapping an auth failure to a
/// user-facing message.
#[derive(Debug, Clone, Copy)]
pub enum AuthFlow {
    SignIn,
    SignUp,
}

pub fn auth_error_to_response(err: &AuthError, flow: AuthFlow) -> axum::response::Response {
    let message = match flow {
        AuthFlow::SignIn => err.sign_in_message(),
        AuthFlow::SignUp => err.sign_up_message(),
    };

    let status = match err {
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::EmailNotConfirmed => StatusCode::FORBIDDEN,
        AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        AuthError::AlreadyRegistered => StatusCode::CONFLICT,
        AuthError::InvalidEmail | AuthError::WeakPassword => StatusCode::BAD_REQUEST,
        AuthError::RegistrationDisabled => StatusCode::FORBIDDEN,
        AuthError::Provider(_) => StatusCode::BAD_GATEWAY,
    };

    json_error(status, "auth_error", message)
}

pub fn coupon_rejection_message(err: &CouponError) -> &'static str {
    match err {
        CouponError::Inactive => "El código de descuento no está activo.",
        CouponError::NotYetValid => "El código de descuento aún no es válido.",
        CouponError::Expired => "El código de descuento ha expirado.",
        CouponError::Exhausted => "El código de descuento ya alcanzó su límite de usos.",
    }
}
