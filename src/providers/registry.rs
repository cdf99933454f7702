// String-keyed provider registry

use super::{GeminiProvider, GroqProvider, Provider};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;

/// Open set of [`Provider`] variants, selected by id.
///
/// Lookup lowercases the requested id so callers may pass `"GROQ"` or
/// `"groq"` interchangeably.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// An empty registry. Useful for tests that supply their own variants.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registry with the built-in backends, sharing one HTTP client.
    pub fn with_defaults(http: Client) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GeminiProvider::new(http.clone())));
        registry.register(Arc::new(GroqProvider::new(http)));
        registry
    }

    /// Add or replace a backend under its own id.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        self.providers
            .insert(provider.id().to_lowercase(), provider);
    }

    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(&provider_id.to_lowercase()).cloned()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
