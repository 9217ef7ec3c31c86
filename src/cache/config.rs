use std::{env, str::FromStr};

use crate::cache::error::CacheError;

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_MAX_ENTRIES: u64 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

impl FromStr for CacheBackend {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(CacheError::Config(format!(
                "unknown CACHE_BACKEND '{other}', expected 'redis' or 'memory'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub url: String,
    pub max_entries: u64,
}

impl CacheConfig {
    pub fn from_env() -> Result<Self, CacheError> {
        let backend = match env::var("CACHE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => CacheBackend::Redis,
        };
        let url = env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());

        Ok(Self {
            backend,
            url,
            max_entries: DEFAULT_MAX_ENTRIES,
        })
    }

    pub fn memory() -> Self {
        Self {
            backend: CacheBackend::Memory,
            url: DEFAULT_REDIS_URL.to_string(),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}
