use serde::Deserialize;

/// Query string of `GET /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text address or place query.
    #[serde(default)]
    pub query: Option<String>,
}

impl SearchRequest {
    /// The query if it has any non-whitespace content.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }
}
