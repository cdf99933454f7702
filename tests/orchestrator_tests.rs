// Orchestrator tests - cache/retry/debounce/delivery wired together

use askcat::cache::{CacheConfig, ResponseCache};
use askcat::config::{ProviderConfig, StaticConfigStore, StoredConfig};
use askcat::delivery::{DeliveryError, DeliveryTarget};
use askcat::error::{AskError, Result};
use askcat::orchestrator::Orchestrator;
use askcat::providers::{Provider, ProviderRegistry};
use askcat::utils::retry::RetryPolicy;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Provider that answers from a script and counts invocations.
struct ScriptedProvider {
    id: &'static str,
    answer: String,
    failures_before_ok: u32,
    calls: AtomicU32,
}

impl ScriptedProvider {
    fn ok(id: &'static str, answer: &str) -> Arc<Self> {
        Arc::new(Self {
            id,
            answer: answer.to_string(),
            failures_before_ok: 0,
            calls: AtomicU32::new(0),
        })
    }

    fn flaky(id: &'static str, answer: &str, failures_before_ok: u32) -> Arc<Self> {
        Arc::new(Self {
            id,
            answer: answer.to_string(),
            failures_before_ok,
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn fetch_response(&self, _text: &str, _config: &ProviderConfig) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= self.failures_before_ok {
            Err(AskError::Provider("upstream hiccup".to_string()))
        } else {
            Ok(self.answer.clone())
        }
    }
}

/// Delivery target that records every message it acknowledges.
#[derive(Default)]
struct RecordingTarget {
    messages: Mutex<Vec<String>>,
}

impl RecordingTarget {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl DeliveryTarget for RecordingTarget {
    async fn deliver(&self, message: &str) -> std::result::Result<(), DeliveryError> {
        self.messages.lock().push(message.to_string());
        Ok(())
    }
}

fn provider_config(key: &str, model: &str) -> ProviderConfig {
    ProviderConfig {
        api_key: key.to_string(),
        selected_model: model.to_string(),
    }
}

fn stored(active: Option<&str>, entries: &[(&str, ProviderConfig)]) -> StoredConfig {
    StoredConfig {
        active_provider: active.map(str::to_string),
        api_config: entries
            .iter()
            .map(|(id, cfg)| (id.to_string(), cfg.clone()))
            .collect(),
    }
}

fn orchestrator(provider: Arc<ScriptedProvider>, store: StoredConfig) -> Arc<Orchestrator> {
    let mut registry = ProviderRegistry::new();
    registry.register(provider);
    let cache = ResponseCache::new(CacheConfig {
        capacity: 100,
        ttl: Duration::from_secs(3600),
    })
    .unwrap();
    Arc::new(
        Orchestrator::new(registry, cache, Arc::new(StaticConfigStore::new(store)))
            .with_retry_policy(RetryPolicy {
                max_attempts: 3,
                initial_delay: Duration::from_millis(1000),
                multiplier: 2.0,
            })
            .with_debounce(Duration::from_millis(500)),
    )
}

/// Give spawned pipeline tasks time to run under the paused clock.
async fn settle() {
    tokio::time::sleep(Duration::from_secs(30)).await;
}

#[tokio::test(start_paused = true)]
async fn test_ask_end_to_end_with_cache_hit_on_equivalent_prompt() {
    let provider = ScriptedProvider::ok("groq", "4");
    let orchestrator = orchestrator(
        provider.clone(),
        stored(Some("groq"), &[("groq", provider_config("x", "m"))]),
    );
    let config = provider_config("x", "m");

    let first = orchestrator.ask("groq", "What is 2+2?", &config).await.unwrap();
    assert_eq!(first.answer, "4");
    assert_eq!(provider.calls(), 1);

    // Case-insensitive equivalent prompt: served from cache, no new call.
    let second = orchestrator.ask("groq", "WHAT IS 2+2?", &config).await.unwrap();
    assert_eq!(second.answer, "4");
    assert_eq!(provider.calls(), 1);
    assert_eq!(orchestrator.cache_stats().hits, 1);
}

#[tokio::test(start_paused = true)]
async fn test_ask_unknown_provider_fails() {
    let provider = ScriptedProvider::ok("groq", "4");
    let orchestrator = orchestrator(provider, stored(None, &[]));
    let result = orchestrator
        .ask("nope", "hi", &provider_config("x", "m"))
        .await;
    assert!(matches!(result, Err(AskError::UnsupportedProvider(_))));
}

#[tokio::test(start_paused = true)]
async fn test_ask_validates_config_before_network() {
    let provider = ScriptedProvider::ok("groq", "4");
    let orchestrator = orchestrator(provider.clone(), stored(None, &[]));

    let missing_model = orchestrator
        .ask("groq", "hi", &provider_config("x", ""))
        .await
        .unwrap_err();
    assert!(missing_model.to_string().contains("No model selected"));

    let missing_key = orchestrator
        .ask("groq", "hi", &provider_config("", "m"))
        .await
        .unwrap_err();
    assert!(missing_key.to_string().contains("API key not found"));

    assert_eq!(provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_submit_delivers_answer() {
    let provider = ScriptedProvider::ok("groq", "hello there");
    let orchestrator = orchestrator(
        provider.clone(),
        stored(Some("groq"), &[("groq", provider_config("x", "m"))]),
    );
    let target = Arc::new(RecordingTarget::default());

    orchestrator.submit("Hi".to_string(), target.clone());
    settle().await;

    assert_eq!(target.messages(), ["hello there"]);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_submit_burst_collapses_to_one_fetch() {
    let provider = ScriptedProvider::ok("groq", "answer");
    let orchestrator = orchestrator(
        provider.clone(),
        stored(Some("groq"), &[("groq", provider_config("x", "m"))]),
    );
    let target = Arc::new(RecordingTarget::default());

    for i in 0..5 {
        orchestrator.submit(format!("question {i}"), target.clone());
    }
    settle().await;

    // Only the trailing submission survives the debounce window.
    assert_eq!(provider.calls(), 1);
    assert_eq!(target.messages(), ["answer"]);
}

#[tokio::test(start_paused = true)]
async fn test_submit_retries_transient_provider_failures() {
    let provider = ScriptedProvider::flaky("groq", "eventually", 2);
    let orchestrator = orchestrator(
        provider.clone(),
        stored(Some("groq"), &[("groq", provider_config("x", "m"))]),
    );
    let target = Arc::new(RecordingTarget::default());

    orchestrator.submit("Hi".to_string(), target.clone());
    settle().await;

    assert_eq!(provider.calls(), 3);
    assert_eq!(target.messages(), ["eventually"]);
}

#[tokio::test(start_paused = true)]
async fn test_submit_delivers_error_text_after_exhausted_retries() {
    let provider = ScriptedProvider::flaky("groq", "never", 99);
    let orchestrator = orchestrator(
        provider.clone(),
        stored(Some("groq"), &[("groq", provider_config("x", "m"))]),
    );
    let target = Arc::new(RecordingTarget::default());

    orchestrator.submit("Hi".to_string(), target.clone());
    settle().await;

    assert_eq!(provider.calls(), 3);
    let messages = target.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Error: "));
    assert!(messages[0].contains("upstream hiccup"));
}

#[tokio::test(start_paused = true)]
async fn test_submit_reports_missing_configuration_distinctly() {
    let provider = ScriptedProvider::ok("groq", "unused");

    // No active provider at all.
    let orchestrator = orchestrator(provider.clone(), stored(None, &[]));
    let target = Arc::new(RecordingTarget::default());
    orchestrator.submit("Hi".to_string(), target.clone());
    settle().await;
    assert!(target.messages()[0].contains("AI provider not configured"));

    // Active provider named but no entry for it.
    let orchestrator = self::orchestrator(provider.clone(), stored(Some("groq"), &[]));
    let target = Arc::new(RecordingTarget::default());
    orchestrator.submit("Hi".to_string(), target.clone());
    settle().await;
    assert!(target.messages()[0].contains("No configuration found for provider 'groq'"));

    assert_eq!(provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_submit_serves_repeat_from_cache() {
    let provider = ScriptedProvider::ok("groq", "cached answer");
    let orchestrator = orchestrator(
        provider.clone(),
        stored(Some("groq"), &[("groq", provider_config("x", "m"))]),
    );
    let target = Arc::new(RecordingTarget::default());

    orchestrator.submit("Hello World".to_string(), target.clone());
    settle().await;
    orchestrator.submit("  hello world  ".to_string(), target.clone());
    settle().await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(target.messages(), ["cached answer", "cached answer"]);
}
