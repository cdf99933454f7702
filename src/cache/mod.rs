// Response cache module

pub mod key;
pub mod models;
pub mod store;

pub use models::{CacheConfig, CacheStats};
pub use store::ResponseCache;
