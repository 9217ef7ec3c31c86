use serde::{Deserialize, Serialize};

/// A news article as stored and served.
///
/// `id` and `created_at` are assigned by the store; anything a client sends
/// for them on create is discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub author: String,
    pub image_url: String,
    pub created_at: String,
}

/// Caller-supplied fields for an insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub author: String,
    pub image_url: String,
}

/// Wire shape of a create request. Any field may be absent or `null`.
///
/// `id` and `created_at` are still type-checked so a client sending the wrong
/// type hears about it, but their values are dropped.
#[derive(Debug, Default, Deserialize)]
struct CreateArticleRequest {
    #[serde(rename = "id")]
    _id: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
    image_url: Option<String>,
    #[serde(rename = "created_at")]
    _created_at: Option<String>,
}

impl NewArticle {
    /// Decode a create request body.
    ///
    /// Missing or null fields default to empty strings, a bare `null` body is
    /// an empty article, and unknown fields are ignored, so only malformed JSON
    /// or a type mismatch is rejected.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let request: Option<CreateArticleRequest> = serde_json::from_slice(body)?;
        let request = request.unwrap_or_default();

        Ok(Self {
            title: request.title.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            author: request.author.unwrap_or_default(),
            image_url: request.image_url.unwrap_or_default(),
        })
    }

    /// Materialise the stored row once the store has picked an id and timestamp.
    pub fn into_article(self, id: i64, created_at: String) -> Article {
        Article {
            id,
            title: self.title,
            description: self.description,
            author: self.author,
            image_url: self.image_url,
            created_at,
        }
    }
}
