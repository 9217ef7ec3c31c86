pub mod types;

pub use types::{Article, NewArticle};
