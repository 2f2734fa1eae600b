//! Error types for the SeisCloud client.

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum SeisError {
    /// Endpoint or HTTP client configuration is unusable.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Request arguments rejected before anything is sent.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The service has no data for the request (404).
    #[error("not found: {what}")]
    NotFound { what: String },

    /// Transport failure, timeout, or non-success status.
    #[error("network error: {message}")]
    Network { message: String },

    /// Response body could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Local cache file could not be read, decoded or written.
    #[error("cache error: {message}")]
    Cache { message: String },

    /// The Green's-function engine failed.
    #[error("engine error: {message}")]
    Engine { message: String },
}

impl SeisError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 1,
            Self::InvalidInput { .. } => 1,

            Self::NotFound { .. } => 2,

            // Remote side
            Self::Network { .. } => 3,
            Self::InvalidResponse { .. } => 4,

            // Local side
            Self::Cache { .. } => 5,
            Self::Engine { .. } => 6,
        }
    }

    /// Whether the failure came from the remote service (always fatal, never retried).
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Network { .. } | Self::InvalidResponse { .. }
        )
    }
}

impl From<reqwest::Error> for SeisError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for client operations.
pub type SeisResult<T> = Result<T, SeisError>;
