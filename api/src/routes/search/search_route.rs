//! GET /api/search: text search + postal-code enrichment through the places provider.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::HeaderMap,
};
use places_service::search_places;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult, QUERY_REQUIRED},
    middleware_layer::request_id::request_id,
    routes::search::{search_request::SearchRequest, search_response::SearchResponse},
};

/// Handler: GET /api/search?query=<text>
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:3001/api/search?query=Eiffel%20Tower'
/// ```
#[instrument(name = "search_route", skip_all)]
pub async fn search_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: Result<Query<SearchRequest>, QueryRejection>,
) -> AppResult<Json<SearchResponse>> {
    let request_id = request_id(&headers).unwrap_or("-");

    let Query(params) = params.inspect_err(|rejection| {
        debug!(%request_id, %rejection, "search_route: query string rejected");
    })?;
    let Some(query) = params.query() else {
        warn!(%request_id, "search_route: missing query");
        return Err(AppError::InvalidRequest(QUERY_REQUIRED));
    };

    debug!(%request_id, %query, "search_route: start");

    match search_places(state.provider.as_ref(), query, state.max_results).await {
        Ok(results) => {
            info!(%request_id, hits = results.len(), "search_route: success");
            Ok(Json(SearchResponse { results }))
        }
        Err(err) => {
            error!(%request_id, error = %err, "search_route: search failed");
            Err(AppError::from_search_failure(&err))
        }
    }
}
