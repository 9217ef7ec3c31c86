//! Article store gateway: the relational source of truth.

pub mod config;
pub mod error;
pub mod memory;
pub mod mysql;

use std::sync::Arc;

use async_trait::async_trait;

use crate::article::{Article, NewArticle};

pub use config::{StoreBackend, StoreConfig};
pub use error::StoreError;
pub use memory::InMemoryArticleStore;
pub use mysql::MySqlArticleStore;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Round-trip to the datastore without touching any data.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Full scan in whatever order the datastore yields rows.
    ///
    /// Rows that fail to decode are logged and skipped; only a scan-level
    /// failure is returned as an error.
    async fn read_all(&self) -> Result<Vec<Article>, StoreError>;

    /// Insert a row stamped with the current time. The generated id is not read back.
    async fn insert(&self, article: NewArticle) -> Result<(), StoreError>;

    /// Delete by id. Deleting an id that does not exist is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}

/// Build the configured store backend.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn ArticleStore>, StoreError> {
    match config.backend {
        StoreBackend::MySql => Ok(Arc::new(MySqlArticleStore::connect(config).await?)),
        StoreBackend::Memory => Ok(Arc::new(InMemoryArticleStore::new())),
    }
}
