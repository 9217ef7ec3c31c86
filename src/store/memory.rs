use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    article::{Article, NewArticle},
    store::{error::StoreError, mysql::TIMESTAMP_FORMAT, ArticleStore},
};

#[derive(Debug)]
struct Rows {
    next_id: i64,
    articles: Vec<Article>,
}

/// Process-local store with auto-increment ids, for development and tests.
#[derive(Debug)]
pub struct InMemoryArticleStore {
    rows: Mutex<Rows>,
}

impl Default for InMemoryArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Rows {
                next_id: 1,
                articles: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Article>, StoreError> {
        Ok(self.rows.lock().await.articles.clone())
    }

    async fn insert(&self, article: NewArticle) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        let id = rows.next_id;
        rows.next_id += 1;

        let created_at = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        rows.articles.push(article.into_article(id, created_at));
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        // An id that is not an integer can never match a row.
        let Ok(id) = id.trim().parse::<i64>() else {
            debug!("article id '{id}' is not numeric, nothing to delete");
            return Ok(());
        };

        self.rows.lock().await.articles.retain(|a| a.id != id);
        Ok(())
    }
}
