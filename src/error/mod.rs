// Error types for the askcat pipeline

use thiserror::Error;

/// Failure taxonomy for a single request through the pipeline.
///
/// The split matters for retry behavior: [`AskError::Transport`] and
/// [`AskError::Provider`] are retried by the backoff executor, while
/// configuration and validation failures fail the request immediately.
#[derive(Error, Debug)]
pub enum AskError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider answered at the transport level but the response body
    /// did not carry the expected answer field.
    #[error("{0}")]
    Validation(String),

    /// Connectivity-level failure, before any provider-reported status.
    #[error("Network error: {0}")]
    Transport(String),

    /// Structured error reported by the provider (auth failure, bad model,
    /// quota). Retried up to the bound even when logically non-recoverable.
    #[error("{0}")]
    Provider(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AskError {
    /// Whether the backoff executor should attempt this request again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Provider(_))
    }

    /// Short machine-readable tag for logs and error envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) | Self::ConfigParsing(_) => "configuration_error",
            Self::Validation(_) => "validation_error",
            Self::Transport(_) => "transport_error",
            Self::Provider(_) => "provider_error",
            Self::UnsupportedProvider(_) => "unsupported_provider",
            Self::Internal(_) => "internal_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, AskError>;
