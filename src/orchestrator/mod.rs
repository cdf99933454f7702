//! Request orchestrator.
//!
//! Coordinates the full pipeline for one logical request: load ambient
//! configuration, validate it, build the cache key, serve from cache on a
//! hit, otherwise run the provider call under the backoff retry executor,
//! populate the cache, and route the result to the caller's sink.

use crate::cache::{key, ResponseCache};
use crate::config::{ConfigStore, ProviderConfig};
use crate::delivery::{deliver_with_retry, DeliveryPolicy, DeliveryTarget};
use crate::error::{AskError, Result};
use crate::providers::ProviderRegistry;
use crate::utils::debounce::Debouncer;
use crate::utils::retry::{with_backoff, RetryPolicy};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Successful answer payload for the request/response path.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub answer: String,
}

pub struct Orchestrator {
    cache: ResponseCache,
    providers: ProviderRegistry,
    config_store: Arc<dyn ConfigStore>,
    retry: RetryPolicy,
    delivery: DeliveryPolicy,
    debouncer: Debouncer,
}

impl Orchestrator {
    pub fn new(
        providers: ProviderRegistry,
        cache: ResponseCache,
        config_store: Arc<dyn ConfigStore>,
    ) -> Self {
        Self {
            cache,
            providers,
            config_store,
            retry: RetryPolicy::default(),
            delivery: DeliveryPolicy::default(),
            debouncer: Debouncer::new(Duration::from_millis(500)),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    pub fn with_delivery_policy(mut self, policy: DeliveryPolicy) -> Self {
        self.delivery = policy;
        self
    }

    pub fn with_debounce(mut self, wait: Duration) -> Self {
        self.debouncer = Debouncer::new(wait);
        self
    }

    /// Fire-and-forget entry point: answer `text` using the stored active
    /// provider and deliver the result to `target`.
    ///
    /// The whole miss path runs inside a trailing debounce window, so a
    /// burst of submissions collapses to the last one; superseded calls are
    /// dropped entirely and deliver nothing. The target always receives
    /// renderable content, a cached/fetched answer or an `Error: ...`
    /// string; nothing escapes this boundary.
    ///
    /// Concurrent misses for the same key from distinct debounce windows may
    /// each reach the network; there is no single-flight de-duplication.
    pub fn submit(self: &Arc<Self>, text: String, target: Arc<dyn DeliveryTarget>) {
        let this = Arc::clone(self);
        self.debouncer.call(async move {
            let message = match this.resolve_and_fetch(&text).await {
                Ok(answer) => answer,
                Err(err) => {
                    error!(kind = err.kind(), "request failed: {err}");
                    format!("Error: {err}")
                }
            };
            deliver_with_retry(target.as_ref(), &message, &this.delivery).await;
        });
    }

    /// Direct request/response entry point, not debounced.
    ///
    /// Shares the cache and retry internals with [`submit`](Self::submit)
    /// but takes the provider id and configuration explicitly and returns
    /// the result to the caller.
    pub async fn ask(
        &self,
        provider_id: &str,
        prompt: &str,
        config: &ProviderConfig,
    ) -> Result<Answer> {
        Self::validate_provider_config(config)?;

        let cache_key = key::question_key(prompt, provider_id, &config.selected_model);
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!("cache hit for question");
            return Ok(Answer { answer: cached });
        }

        let provider = self
            .providers
            .get(provider_id)
            .ok_or_else(|| AskError::UnsupportedProvider(provider_id.to_string()))?;

        debug!(provider = provider.id(), "processing question");
        let answer = with_backoff(&self.retry, AskError::is_retryable, || {
            provider.fetch_response(prompt, config)
        })
        .await?;

        self.cache.set(cache_key, answer.clone());
        Ok(Answer { answer })
    }

    /// Shared miss path for the submit entry point: load and validate the
    /// stored configuration, consult the cache, fetch under retry, populate
    /// the cache.
    async fn resolve_and_fetch(&self, text: &str) -> Result<String> {
        let stored = self.config_store.load().await?;

        let provider_id = stored.active_provider.ok_or_else(|| {
            AskError::Configuration(
                "AI provider not configured. Please set an active provider first.".to_string(),
            )
        })?;
        let config = stored.api_config.get(&provider_id).ok_or_else(|| {
            AskError::Configuration(format!(
                "No configuration found for provider '{provider_id}'. Please set it up first."
            ))
        })?;
        Self::validate_provider_config(config)?;

        let cache_key = key::selection_key(text, &provider_id, &config.selected_model);
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!("cache hit, returning cached response");
            return Ok(cached);
        }

        let provider = self
            .providers
            .get(&provider_id)
            .ok_or_else(|| AskError::UnsupportedProvider(provider_id.clone()))?;

        info!(
            provider = provider.id(),
            model = %config.selected_model,
            "making API request"
        );
        let answer = with_backoff(&self.retry, AskError::is_retryable, || {
            provider.fetch_response(text, config)
        })
        .await?;

        self.cache.set(cache_key, answer.clone());
        Ok(answer)
    }

    /// Validation gate run before any network activity. Each missing field
    /// fails with its own message so the user knows what to fix.
    fn validate_provider_config(config: &ProviderConfig) -> Result<()> {
        if config.selected_model.is_empty() {
            return Err(AskError::Configuration(
                "No model selected. Please configure a model in the settings.".to_string(),
            ));
        }
        if config.api_key.is_empty() {
            return Err(AskError::Configuration(
                "API key not found. Please set up your API key in the settings.".to_string(),
            ));
        }
        Ok(())
    }

    /// Cache statistics, exposed for diagnostics.
    pub fn cache_stats(&self) -> crate::cache::CacheStats {
        self.cache.stats()
    }

    /// Invalidate every cached response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
