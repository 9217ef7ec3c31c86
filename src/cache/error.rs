use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache configuration error: {0}")]
    Config(String),

    #[error("Error constructing Redis pool")]
    CreatePool(#[from] deadpool_redis::CreatePoolError),

    #[error("Error acquiring Redis connection")]
    AcquirePool(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed")]
    Redis(#[from] redis::RedisError),
}
