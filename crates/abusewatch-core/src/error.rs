use thiserror::Error;

/// Result type alias for abusewatch operations
pub type Result<T> = std::result::Result<T, AbuseError>;

/// Errors that can occur while querying the AbuseIPDB API
#[derive(Error, Debug)]
pub enum AbuseError {
    /// No API keys are configured; nothing can be queried
    #[error("no API keys configured")]
    NoApiKeys,

    /// No network prefixes are configured
    #[error("no network prefixes configured")]
    NoPrefixes,

    /// Every attempt for a network came back 401
    #[error("network {network}: unauthorized after {attempts} attempts (401)")]
    UnauthorizedExhausted {
        /// The network prefix being queried
        network: String,
        /// Number of attempts made
        attempts: u32,
    },

    /// The final retry attempt failed at the transport level
    #[error("network {network}: final attempt {attempts} failed: {message}")]
    RetriesExhausted {
        /// The network prefix being queried
        network: String,
        /// Number of attempts made
        attempts: u32,
        /// Transport error from the last attempt
        message: String,
    },

    /// API returned an unexpected, non-retryable status
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API, if any
        message: String,
    },

    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AbuseError {
    /// Returns true if the error may succeed on a retry with a fresh key
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Returns the HTTP status code if this error carries one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnauthorizedExhausted { .. } => Some(401),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
