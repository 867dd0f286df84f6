//! Payment Error Types

use party_core::FailureReason;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Result type for party backend calls
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Local (non-backend) errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value storage unavailable or rejected the write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Value could not be encoded for storage
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PaymentError {
    /// Get user-friendly message
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Service configuration error.",
            Self::Storage(_) => "Your browser storage is unavailable.",
            Self::Serialization(_) => "An error occurred processing your request.",
        }
    }
}

/// Closed set of outcomes a party backend call can fail with.
///
/// Decided once at the client boundary from the HTTP status and the error
/// body's `code`, never by inspecting message text downstream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Referenced party does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// This order was settled by an earlier delivery
    #[error("Payment already processed")]
    AlreadyProcessed,

    /// Request rejected as invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport failure or unexpected response
    #[error("Backend error: {0}")]
    Unknown(String),
}

impl ServiceError {
    pub const ALREADY_PROCESSED_CODE: &'static str = "ALREADY_PROCESSED_PAYMENT";
    pub const PARTY_NOT_FOUND_CODE: &'static str = "PARTY_NOT_FOUND";

    /// Classify a non-success response
    pub fn classify(status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed.code.as_deref();

        if code == Some(Self::ALREADY_PROCESSED_CODE) {
            return Self::AlreadyProcessed;
        }

        let message = parsed.message.clone();
        let describe = || message.clone().unwrap_or_else(|| format!("HTTP {status}"));

        if status == 404 || code == Some(Self::PARTY_NOT_FOUND_CODE) {
            return Self::NotFound(describe());
        }
        match (status, &message) {
            (400 | 409 | 422, _) => Self::Validation(describe()),
            (_, Some(message)) => Self::Unknown(format!("HTTP {status}: {message}")),
            (_, None) => Self::Unknown(format!("HTTP {status}")),
        }
    }

    /// Reason reported when this error ends a run
    pub fn into_failure(self) -> FailureReason {
        match self {
            Self::NotFound(_) => FailureReason::PartyNotFound,
            Self::AlreadyProcessed => {
                FailureReason::Backend("unexpected already-processed response".into())
            }
            Self::Validation(message) => FailureReason::Validation(message),
            Self::Unknown(message) => FailureReason::Backend(message),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unknown(err.to_string())
    }
}

/// Error body returned by the party backend
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_processed_wins_over_status() {
        let body = r#"{"code":"ALREADY_PROCESSED_PAYMENT","message":"done"}"#;
        assert_eq!(ServiceError::classify(409, body), ServiceError::AlreadyProcessed);
        assert_eq!(ServiceError::classify(400, body), ServiceError::AlreadyProcessed);
    }

    #[test]
    fn test_not_found_by_status_or_code() {
        assert!(matches!(ServiceError::classify(404, ""), ServiceError::NotFound(_)));
        assert_eq!(
            ServiceError::classify(400, r#"{"code":"PARTY_NOT_FOUND","message":"gone"}"#),
            ServiceError::NotFound("gone".into())
        );
    }

    #[test]
    fn test_message_text_is_not_inspected() {
        let body = r#"{"code":"INTERNAL","message":"404 Not Found upstream"}"#;
        assert!(matches!(ServiceError::classify(500, body), ServiceError::Unknown(_)));
    }

    #[test]
    fn test_validation_and_unknown() {
        assert_eq!(
            ServiceError::classify(422, r#"{"message":"bad amount"}"#),
            ServiceError::Validation("bad amount".into())
        );
        assert_eq!(
            ServiceError::classify(502, "<html>bad gateway</html>"),
            ServiceError::Unknown("HTTP 502".into())
        );
    }

    #[test]
    fn test_failure_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).into_failure(),
            FailureReason::PartyNotFound
        );
        assert_eq!(
            ServiceError::Unknown("timeout".into()).into_failure(),
            FailureReason::Backend("timeout".into())
        );
    }
}
