//! Errors raised while talking to a search provider.

/// Anything that goes wrong between sending a query to the provider and
/// getting raw results back.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {0}")]
    Status(u16),

    /// The response body did not contain results in a shape we understand.
    #[error("parse error: {0}")]
    Parse(String),

    /// The HTTP client could not be built.
    #[error("client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ProviderError::Status(status.as_u16()),
            None => ProviderError::Http(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = ProviderError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_status() {
        let err = ProviderError::Status(429);
        assert_eq!(err.to_string(), "provider returned status 429");
    }

    #[test]
    fn display_parse() {
        let err = ProviderError::Parse("ytInitialData not found".into());
        assert_eq!(err.to_string(), "parse error: ytInitialData not found");
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: ProviderError = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProviderError>();
    }
}
