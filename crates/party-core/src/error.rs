//! Error Types

use thiserror::Error;

/// Result type alias for callback parsing
pub type Result<T> = std::result::Result<T, CallbackError>;

/// Reasons a gateway redirect cannot be turned into a [`GatewayCallback`](crate::GatewayCallback)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    /// Required query parameter absent
    #[error("Missing callback parameter: {0}")]
    MissingParam(&'static str),

    /// Required query parameter present but blank
    #[error("Empty callback parameter: {0}")]
    EmptyParam(&'static str),

    /// Amount is not a positive integer
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
}
