//! Client Configuration

use crate::error::{PaymentError, Result};

const BASE_URL_VAR: &str = "PARTY_API_BASE_URL";
const TOKEN_VAR: &str = "PARTY_API_TOKEN";

/// Where and how to reach the party backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Absolute http(s) origin, without trailing slash
    pub base_url: String,

    /// Sent as `Authorization: Bearer` when set
    pub bearer_token: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| PaymentError::Config(format!("invalid base URL {base_url:?}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PaymentError::Config(format!(
                "base URL must be http(s), got {:?}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        })
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_VAR)
            .map_err(|_| PaymentError::Config(format!("{BASE_URL_VAR} not set")))?;

        let config = Self::new(&base_url)?;
        Ok(match std::env::var(TOKEN_VAR) {
            Ok(token) if !token.is_empty() => config.with_bearer_token(token),
            _ => config,
        })
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ApiConfig::new("https://api.example.com/").unwrap();
        assert_eq!(config.endpoint("/api/parties"), "https://api.example.com/api/parties");
    }

    #[test]
    fn test_rejects_relative_and_non_http() {
        assert!(matches!(ApiConfig::new("/api"), Err(PaymentError::Config(_))));
        assert!(matches!(ApiConfig::new("ftp://host"), Err(PaymentError::Config(_))));
    }
}
