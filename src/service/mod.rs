//! Cache-aside coordination over the article store.
//!
//! Reads go to the cache first and fall back to the store on a miss, after
//! which the collection is cached under [`ARTICLES_KEY`] for the TTL. Every
//! successful write deletes that key so the next read sees the store's state.
//! Store write and invalidation are not atomic: if the delete fails the old
//! collection is served until it expires.
//!
//! Each operation runs under a deadline; when it passes, the pending store or
//! cache call is dropped and [`ServiceError::Timeout`] is returned.

pub mod error;

use std::{future::Future, sync::Arc, time::Duration};

use bytes::Bytes;
use tracing::{debug, warn};

use crate::{
    article::{Article, NewArticle},
    cache::{ArticleCache, ARTICLES_KEY, ARTICLES_TTL},
    store::ArticleStore,
};

pub use error::ServiceError;

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
    cache: Arc<dyn ArticleCache>,
    ttl: Duration,
    deadline: Duration,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>, cache: Arc<dyn ArticleCache>) -> Self {
        Self {
            store,
            cache,
            ttl: ARTICLES_TTL,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn store(&self) -> &Arc<dyn ArticleStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn ArticleCache> {
        &self.cache
    }

    /// Return every article, served from the cache when possible.
    ///
    /// A cached payload that does not decode is an error; it is never papered
    /// over with a store read.
    pub async fn fetch_all(&self) -> Result<Vec<Article>, ServiceError> {
        self.within_deadline(self.read_through()).await
    }

    pub async fn create(&self, article: NewArticle) -> Result<(), ServiceError> {
        self.within_deadline(async {
            self.store.insert(article).await?;
            self.invalidate().await;
            Ok(())
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.within_deadline(async {
            self.store.delete_by_id(id).await?;
            self.invalidate().await;
            Ok(())
        })
        .await
    }

    async fn within_deadline<T>(
        &self,
        operation: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        tokio::time::timeout(self.deadline, operation)
            .await
            .map_err(|_| ServiceError::Timeout(self.deadline))?
    }

    async fn read_through(&self) -> Result<Vec<Article>, ServiceError> {
        match self.cache.get(ARTICLES_KEY).await {
            Ok(Some(payload)) => {
                debug!("article cache hit ({} bytes)", payload.len());
                return serde_json::from_slice(&payload).map_err(ServiceError::CorruptCache);
            }
            Ok(None) => debug!("article cache miss"),
            Err(e) => warn!(error = ?e, "article cache lookup failed, reading from store"),
        }

        let articles = self.store.read_all().await?;
        self.populate(&articles).await;
        Ok(articles)
    }

    async fn populate(&self, articles: &[Article]) {
        let payload = match serde_json::to_vec(articles) {
            Ok(payload) => Bytes::from(payload),
            Err(e) => {
                warn!(error = ?e, "could not encode article collection for caching");
                return;
            }
        };

        if let Err(e) = self.cache.set(ARTICLES_KEY, payload, self.ttl).await {
            warn!(error = ?e, "failed to populate article cache");
        }
    }

    async fn invalidate(&self) {
        if let Err(e) = self.cache.delete(ARTICLES_KEY).await {
            warn!(error = ?e, "failed to invalidate article cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cache::MokaCache, store::InMemoryArticleStore};
    use pretty_assertions::assert_eq;

    fn service() -> ArticleService {
        ArticleService::new(
            Arc::new(InMemoryArticleStore::new()),
            Arc::new(MokaCache::new(16)),
        )
    }

    fn titled(title: &str) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_store_caches_empty_array() {
        let service = service();

        assert!(service.fetch_all().await.unwrap().is_empty());
        assert_eq!(
            service.cache().get(ARTICLES_KEY).await.unwrap(),
            Some(Bytes::from_static(b"[]"))
        );
    }

    #[tokio::test]
    async fn test_cached_collection_is_served_until_invalidated() {
        let service = service();
        service.create(titled("first")).await.unwrap();
        let first = service.fetch_all().await.unwrap();

        // A write behind the coordinator's back is not visible through the cache.
        service.store().insert(titled("hidden")).await.unwrap();
        assert_eq!(service.fetch_all().await.unwrap(), first);

        service.delete("1").await.unwrap();
        let titles: Vec<_> = service
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["hidden".to_string()]);
    }

    #[tokio::test]
    async fn test_create_drops_cache_key() {
        let service = service();
        service.fetch_all().await.unwrap();
        assert!(service.cache().get(ARTICLES_KEY).await.unwrap().is_some());

        service.create(titled("T")).await.unwrap();
        assert_eq!(service.cache().get(ARTICLES_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_cache_payload_is_an_error() {
        let service = service();
        service.create(titled("in store")).await.unwrap();
        service
            .cache()
            .set(ARTICLES_KEY, Bytes::from_static(b"{garbage"), ARTICLES_TTL)
            .await
            .unwrap();

        let result = service.fetch_all().await;
        assert!(matches!(result, Err(ServiceError::CorruptCache(_))));
    }

    #[tokio::test]
    async fn test_deadline_cancels_slow_cache() {
        struct StalledCache;

        #[async_trait::async_trait]
        impl ArticleCache for StalledCache {
            async fn ping(&self) -> Result<(), crate::cache::CacheError> {
                Ok(())
            }

            async fn get(&self, _key: &str) -> Result<Option<Bytes>, crate::cache::CacheError> {
                std::future::pending().await
            }

            async fn set(
                &self,
                _key: &str,
                _value: Bytes,
                _ttl: Duration,
            ) -> Result<(), crate::cache::CacheError> {
                Ok(())
            }

            async fn delete(&self, _key: &str) -> Result<(), crate::cache::CacheError> {
                std::future::pending().await
            }
        }

        let service = ArticleService::new(
            Arc::new(InMemoryArticleStore::new()),
            Arc::new(StalledCache),
        )
        .with_deadline(Duration::from_millis(50));

        assert!(matches!(
            service.fetch_all().await,
            Err(ServiceError::Timeout(_))
        ));
        assert!(matches!(
            service.create(titled("T")).await,
            Err(ServiceError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_expired_entry_forces_store_read() {
        let service = service().with_ttl(Duration::from_millis(50));
        service.fetch_all().await.unwrap();
        service.store().insert(titled("late")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(service.fetch_all().await.unwrap().len(), 1);
    }
}
