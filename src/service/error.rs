use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Error reading from or writing to the article store")]
    Store(#[from] StoreError),

    #[error("Cached article collection could not be decoded")]
    CorruptCache(#[source] serde_json::Error),

    #[error("Article operation did not finish within {0:?}")]
    Timeout(Duration),
}
