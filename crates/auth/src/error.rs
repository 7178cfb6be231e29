//! Auth failure taxonomy and user-facing message classification.
//!
//! Provider failures are classified into a small closed set; anything the
//! provider reports outside that set lands in `Provider` and is shown to the
//! user as a generic message. Nothing here is allowed to escape the session
//! boundary as a panic.

use thiserror::Error;

/// Classified failure from the auth provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email not confirmed")]
    EmailNotConfirmed,

    #[error("too many attempts")]
    RateLimited,

    #[error("email already registered")]
    AlreadyRegistered,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("password too short")]
    WeakPassword,

    #[error("registration is disabled")]
    RegistrationDisabled,

    /// Unclassified provider or transport failure.
    #[error("auth provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// User-facing message for a sign-in failure.
    pub fn sign_in_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => {
                "Credenciales incorrectas. Verifica tu email y contraseña."
            }
            AuthError::EmailNotConfirmed => {
                "Por favor confirma tu correo electrónico antes de iniciar sesión."
            }
            AuthError::RateLimited => "Demasiados intentos. Por favor espera un momento.",
            AuthError::InvalidEmail => "Dirección de correo electrónico inválida.",
            _ => "Error inesperado al iniciar sesión. Por favor intenta nuevamente.",
        }
    }

    /// User-facing message for a sign-up failure.
    pub fn sign_up_message(&self) -> &'static str {
        match self {
            AuthError::AlreadyRegistered => "Esta dirección de correo ya está registrada.",
            AuthError::InvalidEmail => "Dirección de correo electrónico inválida.",
            AuthError::WeakPassword => "La contraseña debe tener al menos 6 caracteres.",
            AuthError::RegistrationDisabled => {
                "El registro está deshabilitado. Contacta al administrador."
            }
            _ => "Error al crear la cuenta. Por favor intenta nuevamente.",
        }
    }
}

/// Failure from the profile store.
///
/// Note the asymmetry with "record not found": lookups return
/// `Ok(None)` for a genuinely missing profile; this error is reserved for
/// transport/provider failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileStoreError {
    #[error("profile store unavailable: {0}")]
    Transport(String),
}
