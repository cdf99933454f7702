//! Configuration data structures for the askcat pipeline.
//!
//! Defines the schema for application settings: provider credentials, cache
//! sizing, retry and delivery policies, dispatch debouncing, and logging.

use crate::cache::CacheConfig;
use crate::delivery::DeliveryPolicy;
use crate::utils::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Per-provider credentials and model selection, keyed by provider id.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Which provider id serves requests that do not name one explicitly.
    #[serde(default)]
    pub active_provider: Option<String>,

    /// Response cache sizing and expiry.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Fetch retry policy.
    #[serde(default)]
    pub retry: RetrySettings,

    /// Result delivery retry policy.
    #[serde(default)]
    pub delivery: DeliverySettings,

    /// Request dispatch settings.
    #[serde(default)]
    pub dispatch: DispatchSettings,

    /// Upstream HTTP transport settings.
    #[serde(default)]
    pub http: HttpSettings,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Credentials and model selection for one provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Secret credential, transmitted per the provider's auth convention.
    #[serde(default)]
    pub api_key: String,

    /// Provider-specific model identifier.
    #[serde(default)]
    pub selected_model: String,
}

/// Settings for the response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of cached responses.
    /// Default: `100`
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Seconds a cached response stays servable.
    /// Default: `3600` (1 hour)
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

/// Settings for the fetch retry executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts per request, including the first.
    /// Default: `3`
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt, doubled per attempt after.
    /// Default: `1000`
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,
}

/// Settings for best-effort result delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySettings {
    /// Delivery attempts before the message is dropped.
    /// Default: `3`
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second delivery attempt, grown 1.5x per attempt.
    /// Default: `500`
    #[serde(default = "default_delivery_delay")]
    pub base_delay_ms: u64,
}

/// Settings for request dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// Quiet window for the trailing-edge debounce on the submit path.
    /// Default: `500`
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

/// Settings for the upstream HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl CacheSettings {
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.capacity,
            ttl: Duration::from_secs(self.ttl_seconds),
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            multiplier: 2.0,
        }
    }
}

impl DeliverySettings {
    pub fn policy(&self) -> DeliveryPolicy {
        DeliveryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            multiplier: 1.5,
        }
    }
}

impl DispatchSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// Default trait implementations linking to custom logic

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_seconds: default_cache_ttl(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay(),
        }
    }
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_delivery_delay(),
        }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants

fn default_cache_capacity() -> usize {
    100
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay() -> u64 {
    1000
}

fn default_delivery_delay() -> u64 {
    500
}

fn default_debounce() -> u64 {
    500
}

fn default_timeout() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
