// askcat - selection-to-answer AI pipeline

use anyhow::{anyhow, Context, Result};
use askcat::cache::ResponseCache;
use askcat::cli::Args;
use askcat::config::{AppConfig, StaticConfigStore};
use askcat::orchestrator::Orchestrator;
use askcat::providers::{build_http_client, ProviderRegistry};
use askcat::utils::logging;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting askcat v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Resolve the provider for this request
    let provider_id = args
        .provider
        .clone()
        .or_else(|| config.active_provider.clone())
        .ok_or_else(|| {
            anyhow!("no provider selected; pass --provider or set active_provider in the config")
        })?;
    let provider_config = config
        .providers
        .get(&provider_id)
        .cloned()
        .with_context(|| format!("no configuration for provider '{provider_id}'"))?;

    // Phase 4: Build the request pipeline
    let http = build_http_client(config.http.timeout_seconds)?;
    let registry = ProviderRegistry::with_defaults(http);
    let cache = ResponseCache::new(config.cache.cache_config())?;
    let store = Arc::new(StaticConfigStore::from(&config));
    let orchestrator = Orchestrator::new(registry, cache, store)
        .with_retry_policy(config.retry.policy())
        .with_delivery_policy(config.delivery.policy())
        .with_debounce(config.dispatch.debounce());

    // Phase 5: Run the direct request/response path and print the answer
    let answer = orchestrator
        .ask(&provider_id, &args.prompt, &provider_config)
        .await?;
    println!("{}", answer.answer);

    Ok(())
}
