//! Similarity between a candidate listing and a reference listing, used for
//! the "similar listings" block on a listing page.

use super::paginate::{paginate, Page};
use super::sort::{sort_listings, SortStrategy};
use crate::models::Listing;
use tracing::debug;

/// Same neighborhood
pub const NEIGHBORHOOD_POINTS: u8 = 3;
/// Price within [`PRICE_TOLERANCE`] of the reference price
pub const PRICE_POINTS: u8 = 2;
/// Same room count
pub const ROOM_POINTS: u8 = 1;
/// Relative price difference that still counts as "similar"
pub const PRICE_TOLERANCE: f64 = 0.20;

pub const MAX_SCORE: u8 = NEIGHBORHOOD_POINTS + PRICE_POINTS + ROOM_POINTS;

/// Additive similarity score in `0..=MAX_SCORE`. Higher is more similar.
///
/// Each rule contributes independently; missing data on either side just
/// means that rule awards nothing.
pub fn similarity_score(candidate: &Listing, reference: &Listing) -> u8 {
    let mut score = 0;

    let neighborhood = &reference.location.neighborhood;
    if !neighborhood.is_empty() && candidate.location.neighborhood == *neighborhood {
        score += NEIGHBORHOOD_POINTS;
    }

    if let (Some(price), Some(reference_price)) = (candidate.price, reference.price) {
        // the reference price is the denominator, so zero disables the rule
        if reference_price > 0.0 && (price - reference_price).abs() / reference_price < PRICE_TOLERANCE {
            score += PRICE_POINTS;
        }
    }

    if let (Some(rooms), Some(reference_rooms)) = (candidate.room_count(), reference.room_count()) {
        if rooms == reference_rooms {
            score += ROOM_POINTS;
        }
    }

    score
}

/// Listings related to `reference`, most similar first.
///
/// The reference itself is left out. Ties keep snapshot order, so repeated
/// "show more" requests page through a stable sequence.
pub fn related_listings<'a, I>(
    snapshot: I,
    reference: &Listing,
    page: usize,
    page_size: usize,
) -> Page<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let candidates: Vec<&Listing> = snapshot
        .into_iter()
        .filter(|listing| listing.id != reference.id)
        .collect();
    let ranked = sort_listings(&candidates, SortStrategy::Similarity, Some(reference));

    debug!(
        "Ranked {} related listings for {}",
        ranked.len(),
        reference.slug
    );
    paginate(&ranked, page, page_size)
}
