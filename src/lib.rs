pub mod article;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod store;

pub use article::{Article, NewArticle};
pub use error::ApiError;
pub use service::ArticleService;
