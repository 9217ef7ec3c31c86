#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use article_service::{
    article::{Article, NewArticle},
    cache::{ArticleCache, CacheError, MokaCache},
    http::router,
    store::{ArticleStore, InMemoryArticleStore, StoreError},
    ArticleService,
};
use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;

/// Cache wrapper whose operations can be switched to fail one by one.
pub struct FlakyCache {
    inner: MokaCache,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FlakyCache {
    pub fn new() -> Self {
        Self {
            inner: MokaCache::new(16),
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }
}

fn unavailable() -> CacheError {
    CacheError::Config("cache unavailable".to_string())
}

#[async_trait]
impl ArticleCache for FlakyCache {
    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), CacheError> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.delete(key).await
    }
}

/// Store whose every call fails, optionally after a delay.
pub struct BrokenStore {
    pub delay: Duration,
}

#[async_trait]
impl ArticleStore for BrokenStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Config("connection refused".to_string()))
    }

    async fn read_all(&self) -> Result<Vec<Article>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Err(StoreError::Config("connection refused".to_string()))
    }

    async fn insert(&self, _article: NewArticle) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        Err(StoreError::Config("connection refused".to_string()))
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        Err(StoreError::Config("connection refused".to_string()))
    }
}

pub fn memory_service() -> ArticleService {
    ArticleService::new(
        Arc::new(InMemoryArticleStore::new()),
        Arc::new(MokaCache::new(16)),
    )
}

pub fn test_server(service: ArticleService) -> TestServer {
    TestServer::new(router(service)).unwrap()
}

pub fn new_article(title: &str) -> NewArticle {
    NewArticle {
        title: title.to_string(),
        description: "D".to_string(),
        author: "A".to_string(),
        image_url: String::new(),
    }
}
