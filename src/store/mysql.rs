use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{
    mysql::{MySqlPool, MySqlPoolOptions, MySqlRow},
    Row,
};
use tracing::{debug, info, warn};

use crate::{
    article::{Article, NewArticle},
    store::{config::StoreConfig, error::StoreError, ArticleStore},
};

const SELECT_ALL: &str =
    "SELECT id, title, description, author, image_url, created_at FROM articles";
const INSERT: &str = "INSERT INTO articles (title, description, author, image_url, created_at) \
                      VALUES (?, ?, ?, ?, ?)";
const DELETE_BY_ID: &str = "DELETE FROM articles WHERE id = ?";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// MySQL-backed gateway over the `articles` table.
#[derive(Clone)]
pub struct MySqlArticleStore {
    pool: MySqlPool,
}

impl MySqlArticleStore {
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StoreError::Config("DATABASE_URL not set".to_string()))?;

        info!(
            url = %mask_password(url),
            max_connections = config.max_connections,
            "Creating MySQL connection pool"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self::new(pool))
    }

    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for MySqlArticleStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        debug!("Database connection test successful");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query(SELECT_ALL).fetch_all(&self.pool).await?;
        let articles = keep_decoded(rows.iter().map(decode_row));

        debug!("read {} of {} article rows", articles.len(), rows.len());
        Ok(articles)
    }

    async fn insert(&self, article: NewArticle) -> Result<(), StoreError> {
        sqlx::query(INSERT)
            .bind(article.title)
            .bind(article.description)
            .bind(article.author)
            .bind(article.image_url)
            .bind(Utc::now().naive_utc())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query(DELETE_BY_ID).bind(id).execute(&self.pool).await?;
        debug!("deleted {} row(s) for article id {id}", result.rows_affected());
        Ok(())
    }
}

/// Drop rows that failed to decode, logging each one, and keep the rest in order.
fn keep_decoded(rows: impl IntoIterator<Item = Result<Article, sqlx::Error>>) -> Vec<Article> {
    rows.into_iter()
        .filter_map(|row| match row {
            Ok(article) => Some(article),
            Err(e) => {
                warn!("skipping undecodable article row: {e}");
                None
            }
        })
        .collect()
}

fn decode_row(row: &MySqlRow) -> Result<Article, sqlx::Error> {
    let created_at: NaiveDateTime = row.try_get("created_at")?;

    Ok(Article {
        id: decode_id(row)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        author: row.try_get("author")?,
        image_url: row.try_get("image_url")?,
        created_at: created_at.format(TIMESTAMP_FORMAT).to_string(),
    })
}

/// Accept both signed and unsigned integer id columns.
fn decode_id(row: &MySqlRow) -> Result<i64, sqlx::Error> {
    match row.try_get::<i64, _>("id") {
        Err(sqlx::Error::ColumnDecode { .. }) => {
            let id: u64 = row.try_get("id")?;
            i64::try_from(id).map_err(|e| sqlx::Error::ColumnDecode {
                index: "id".to_string(),
                source: Box::new(e),
            })
        }
        other => other,
    }
}

/// Hide the password part of a connection URL before it reaches the log.
fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            if colon_pos > scheme_end {
                return format!("{}:****{}", &url[..colon_pos], &url[at_pos..]);
            }
        }
    }
    url.to_string()
}
