//! Navigation collaborator.

use serde::{Deserialize, Serialize};

/// Kind of condition being reported to the error view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewErrorKind {
    Error,
    Unauthorized,
}

/// Opaque navigation state handed to the destination view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavState {
    /// Message + severity for the error view.
    Error {
        message: String,
        #[serde(rename = "type")]
        error_kind: ViewErrorKind,
    },
    /// Original location, preserved for post-login return.
    From { path: String },
}

/// Imperative route changes. Implementations are expected to be cheap and
/// infallible; a navigation that cannot be performed is the host's problem,
/// not the state machine's.
pub trait Navigator {
    /// Navigate to `path`. `replace` substitutes the current history entry
    /// instead of pushing a new one.
    fn go_to(&self, path: &str, replace: bool, state: Option<NavState>);

    /// The path currently being displayed.
    fn current_path(&self) -> String;
}
