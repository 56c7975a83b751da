//! Client-side refinement of a listing snapshot: filter, rank, sort, page.
//!
//! Nothing here keeps state between calls. Every filter, sort or page change
//! recomputes all stages from the snapshot, which is only ever borrowed.

pub mod filter;
pub mod paginate;
pub mod similarity;
pub mod sort;
pub mod stats;
pub mod text;

pub use filter::{filter_listings, FilterSpec};
pub use paginate::{clamp_page, paginate, Page, RELATED_PAGE_SIZE, SEARCH_PAGE_SIZE};
pub use similarity::{related_listings, similarity_score};
pub use sort::{sort_listings, SortStrategy};
pub use stats::{price_delta_percent, ListingStats};

use crate::models::Listing;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the search page sends on each interaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchRequest {
    pub filter: FilterSpec,
    pub sort: SortStrategy,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    /// Listing that `SortStrategy::Similarity` ranks against
    pub reference_id: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            sort: SortStrategy::default(),
            page: 1,
            page_size: SEARCH_PAGE_SIZE,
            reference_id: None,
        }
    }
}

/// View model handed to the presentation layer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchResults<'a> {
    #[serde(flatten)]
    pub page: Page<&'a Listing>,
    /// Computed over the whole filtered set, not just the current page
    pub stats: ListingStats,
}

/// Run filter, sort and pagination over `snapshot`.
pub fn run_search<'a>(snapshot: &'a [Listing], request: &SearchRequest) -> SearchResults<'a> {
    let reference = request
        .reference_id
        .as_deref()
        .and_then(|id| snapshot.iter().find(|listing| listing.id == id));
    if let (Some(id), None) = (&request.reference_id, reference) {
        debug!("Reference listing {} not in snapshot, similarity sort disabled", id);
    }

    // a listing is never shown as similar to itself
    let mut filtered = filter_listings(snapshot, &request.filter);
    if let Some(reference) = reference {
        filtered.retain(|listing| listing.id != reference.id);
    }
    let stats = ListingStats::compute(filtered.iter().copied());

    let sorted = sort_listings(&filtered, request.sort, reference);
    let page = paginate(&sorted, request.page, request.page_size);

    debug!(
        "Search {}: {} matches, page {}/{}",
        request.sort,
        page.total_count,
        request.page,
        page.total_pages
    );

    SearchResults { page, stats }
}
