// Configuration store boundary
//
// The orchestrator reads ambient provider configuration per request through
// this trait and never writes it back. Production code adapts whatever holds
// the persisted settings; tests supply fakes.

use crate::config::ProviderConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Snapshot of the persisted provider configuration.
#[derive(Debug, Clone, Default)]
pub struct StoredConfig {
    /// Provider id serving requests, if one has been chosen.
    pub active_provider: Option<String>,
    /// Per-provider credentials and model selection.
    pub api_config: HashMap<String, ProviderConfig>,
}

/// Read-only access to the persisted configuration.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load(&self) -> Result<StoredConfig>;
}

/// A [`ConfigStore`] over an in-memory snapshot, used by the CLI after a
/// one-time [`AppConfig::load`](crate::config::AppConfig::load) and by tests.
pub struct StaticConfigStore {
    snapshot: StoredConfig,
}

impl StaticConfigStore {
    pub fn new(snapshot: StoredConfig) -> Self {
        Self { snapshot }
    }
}

impl From<&crate::config::AppConfig> for StaticConfigStore {
    fn from(config: &crate::config::AppConfig) -> Self {
        Self::new(StoredConfig {
            active_provider: config.active_provider.clone(),
            api_config: config.providers.clone(),
        })
    }
}

#[async_trait]
impl ConfigStore for StaticConfigStore {
    async fn load(&self) -> Result<StoredConfig> {
        Ok(self.snapshot.clone())
    }
}
