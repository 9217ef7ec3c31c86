use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

use crate::{
    article::{Article, NewArticle},
    error::ApiError,
    service::ArticleService,
};

pub fn router(service: ArticleService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/{id}", delete(delete_article))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_articles(
    State(service): State<ArticleService>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = service.fetch_all().await?;
    debug!("returning {} articles", articles.len());
    Ok(Json(articles))
}

/// The body is decoded as JSON whatever its Content-Type says.
pub async fn create_article(
    State(service): State<ArticleService>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let article = NewArticle::from_json(&body)?;
    service.create(article).await?;
    Ok(StatusCode::CREATED)
}

pub async fn delete_article(
    State(service): State<ArticleService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete(&id).await?;
    Ok(StatusCode::OK)
}
