//! Two-stage search: provider text search, then one concurrent detail lookup
//! per kept candidate to fill in the postal code.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::error_handler::Result;
use crate::models::{CandidatePlace, SearchResult};
use crate::postal_code::extract_postal_code;
use crate::provider::PlacesProvider;

/// Maximum number of results returned for one query.
pub const MAX_RESULTS: usize = 3;

/// Runs a search and returns at most `limit` results in provider rank order.
///
/// A failing text search fails the whole call. A failing detail lookup only
/// leaves that item's `postal_code` empty; the batch settles once every
/// lookup has either returned or failed.
///
/// # Errors
/// Whatever the provider's text search returns.
#[instrument(skip_all, fields(query = %query, limit = limit))]
pub async fn search_places(
    provider: &dyn PlacesProvider,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchResult>> {
    let candidates = provider.text_search(query).await?;
    let available = candidates.len();

    let mut seen = HashSet::new();
    let mut top: Vec<CandidatePlace> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.place_id.clone()))
        .take(limit)
        .collect();

    debug!(available, kept = top.len(), "search_places: candidates selected");

    let lookups = top
        .iter()
        .map(|c| provider.address_components(&c.place_id));
    let settled = join_all(lookups).await;

    let mut enriched = 0usize;
    for (candidate, outcome) in top.iter_mut().zip(settled) {
        match outcome {
            Ok(components) => {
                candidate.address_components = components;
                enriched += 1;
            }
            Err(err) => {
                candidate.address_components.clear();
                warn!(
                    place_id = %candidate.place_id,
                    error = %err,
                    "search_places: detail lookup failed, postal code left empty"
                );
            }
        }
    }

    let results: Vec<SearchResult> = top
        .into_iter()
        .map(|candidate| {
            let postal_code = extract_postal_code(&candidate.address_components)
                .unwrap_or_default()
                .to_string();
            SearchResult::from_candidate(candidate, postal_code)
        })
        .collect();

    info!(results = results.len(), enriched, "search_places: finished");

    Ok(results)
}
