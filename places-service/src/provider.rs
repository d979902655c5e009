//! Provider abstraction.

use futures::future::BoxFuture;

use crate::error_handler::Result;
use crate::models::{AddressComponent, CandidatePlace};

/// Provider interface for place search and detail lookups.
///
/// Implement this trait to plug in a different places backend. Implementations
/// must be shareable across request handlers.
pub trait PlacesProvider: Send + Sync {
    /// Free-text search. Returns candidates in provider rank order; an empty
    /// list when the provider found nothing.
    fn text_search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<CandidatePlace>>>;

    /// Detail lookup restricted to the structured address of one place.
    fn address_components<'a>(
        &'a self,
        place_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<AddressComponent>>>;
}
