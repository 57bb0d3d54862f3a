use serde::Serialize;

/// Defines errors that can occur when calling an external provider.
///
/// None of these reach an end user: the orchestrator turns advice failures into the
/// fallback template and the translation adapter turns translation failures into the
/// original text.
#[derive(Debug, thiserror::Error, Serialize, Clone, PartialEq)]
pub enum ProviderError {
    /// The capability is not configured in this deployment.
    #[error("provider not configured")]
    Unavailable,
    /// Transport-level failure (connection refused, TLS, DNS).
    #[error("HTTP request failed: {0}")]
    Http(String),
    /// The provider answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    /// The provider answered 2xx but the payload was not what we expect.
    #[error("malformed provider response: {0}")]
    Malformed(String),
    /// The provider did not answer within the caller's bound.
    #[error("provider timed out: {0}")]
    Timeout(String),
    /// The requested target language is not in the supported set.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl From<tokio::time::error::Elapsed> for ProviderError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ProviderError::Timeout(err.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Http(err.to_string())
        }
    }
}
