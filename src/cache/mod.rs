//! Key/value cache holding the serialized article collection.

pub mod config;
pub mod error;
pub mod memory;
pub mod redis_backend;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;

pub use config::{CacheBackend, CacheConfig};
pub use error::CacheError;
pub use memory::MokaCache;
pub use redis_backend::RedisCache;

/// The single key under which the whole collection is cached.
pub const ARTICLES_KEY: &str = "articles";

/// How long a cached collection may be served before it is re-read.
pub const ARTICLES_TTL: Duration = Duration::from_secs(15 * 60);

#[async_trait]
pub trait ArticleCache: Send + Sync {
    async fn ping(&self) -> Result<(), CacheError>;

    /// `Ok(None)` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError>;

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), CacheError>;

    /// Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Build the configured cache backend.
pub fn connect(config: &CacheConfig) -> Result<Arc<dyn ArticleCache>, CacheError> {
    match config.backend {
        CacheBackend::Redis => Ok(Arc::new(RedisCache::new(&config.url)?)),
        CacheBackend::Memory => Ok(Arc::new(MokaCache::new(config.max_entries))),
    }
}
