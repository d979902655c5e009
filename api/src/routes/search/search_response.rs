use places_service::SearchResult;
use serde::{Deserialize, Serialize};

/// Body of a successful `GET /api/search`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}
