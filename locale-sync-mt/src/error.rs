//! Error types for machine translation providers

use thiserror::Error;

/// Errors raised by a [`MachineTranslator`](crate::MachineTranslator)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MtError {
    /// Provider is missing credentials or was configured with unusable values
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Locale code failed validation before any request was made
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// The request could not be sent or the connection failed
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The service answered with a non-success status
    #[error("HTTP {status} {status_text}: {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },
    /// The service answered but the payload was not what we expected
    #[error("Translation error: {0}")]
    TranslationError(String),
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::NetworkError(err.to_string())
    }
}

impl MtError {
    /// Build an [`MtError::Http`] from a failed response, consuming its body.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        MtError::Http {
            status: status.as_u16(),
            status_text,
            body,
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
