//! AI provider abstraction.
//!
//! One [`Provider`] implementation per backend, selected at runtime through
//! the string-keyed [`ProviderRegistry`]. Adding a backend means implementing
//! the trait and registering it; the orchestrator never enumerates variants.

mod gemini;
mod groq;
mod registry;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use registry::ProviderRegistry;

use crate::config::ProviderConfig;
use crate::error::{AskError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// "Send text, get answer text" capability of one AI backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Identifier the registry and cache keys use for this backend.
    fn id(&self) -> &'static str;

    /// Issue one request and extract the answer text.
    ///
    /// Transport failures map to [`AskError::Transport`], provider-reported
    /// failures to [`AskError::Provider`] with the provider's message (plus
    /// guidance for known conditions), and a success body missing the
    /// expected answer field to [`AskError::Validation`].
    async fn fetch_response(&self, text: &str, config: &ProviderConfig) -> Result<String>;
}

/// Build the shared HTTP client with pooling and timeouts.
pub fn build_http_client(timeout_seconds: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)
        .use_rustls_tls()
        .build()
        .map_err(|e| AskError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Normalize a connectivity-level failure into the distinct network error
/// message surfaced to users.
pub(crate) fn network_error(err: reqwest::Error) -> AskError {
    AskError::Transport(format!(
        "{}. Please check your internet connection.",
        err
    ))
}
