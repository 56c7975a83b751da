//! Named sort orders for search results.

use super::similarity::similarity_score;
use crate::error::ParseError;
use crate::models::Listing;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort order selected on the search page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    /// Most similar to the reference listing first
    #[default]
    Similarity,
    PriceAsc,
    PriceDesc,
    SizeAsc,
    SizeDesc,
    /// Most recently created first
    Newest,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 6] = [
        SortStrategy::Similarity,
        SortStrategy::PriceAsc,
        SortStrategy::PriceDesc,
        SortStrategy::SizeAsc,
        SortStrategy::SizeDesc,
        SortStrategy::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortStrategy::Similarity => "similarity",
            SortStrategy::PriceAsc => "price-asc",
            SortStrategy::PriceDesc => "price-desc",
            SortStrategy::SizeAsc => "size-asc",
            SortStrategy::SizeDesc => "size-desc",
            SortStrategy::Newest => "newest",
        }
    }
}

impl FromStr for SortStrategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == wanted)
            .ok_or(ParseError::SortStrategy(wanted))
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Missing prices and sizes sort as zero. They are placed, never dropped.
/// Adding 0.0 folds -0.0 into 0.0, which `total_cmp` would otherwise order
/// before it.
fn price_key(listing: &Listing) -> f64 {
    listing.price.unwrap_or(0.0) + 0.0
}

fn size_key(listing: &Listing) -> f64 {
    listing.size_m2().unwrap_or(0.0) + 0.0
}

/// Return a sorted copy of `listings`.
///
/// The sort is stable: listings with equal keys keep their input order, so
/// sorting an already sorted slice returns it unchanged. `Similarity` needs a
/// reference; without one every score is zero and the input order stands.
pub fn sort_listings<'a>(
    listings: &[&'a Listing],
    strategy: SortStrategy,
    reference: Option<&Listing>,
) -> Vec<&'a Listing> {
    let mut sorted = listings.to_vec();
    match strategy {
        SortStrategy::Similarity => {
            if let Some(reference) = reference {
                // score once per listing instead of once per comparison
                let mut scored: Vec<(u8, &'a Listing)> = sorted
                    .into_iter()
                    .map(|listing| (similarity_score(listing, reference), listing))
                    .collect();
                scored.sort_by(|(a, _), (b, _)| b.cmp(a));
                sorted = scored.into_iter().map(|(_, listing)| listing).collect();
            }
        }
        SortStrategy::PriceAsc => sorted.sort_by(|a, b| price_key(a).total_cmp(&price_key(b))),
        SortStrategy::PriceDesc => sorted.sort_by(|a, b| price_key(b).total_cmp(&price_key(a))),
        SortStrategy::SizeAsc => sorted.sort_by(|a, b| size_key(a).total_cmp(&size_key(b))),
        SortStrategy::SizeDesc => sorted.sort_by(|a, b| size_key(b).total_cmp(&size_key(a))),
        SortStrategy::Newest => sorted.sort_by(|a, b| newest_first(a, b)),
    }
    sorted
}

fn newest_first(a: &Listing, b: &Listing) -> Ordering {
    b.created_at.cmp(&a.created_at)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::models::fixtures::{created_on_day, listing};
    use proptest::prelude::*;

    fn arb_listings() -> impl Strategy<Value = Vec<Listing>> {
        prop::collection::vec(
            (
                prop::option::of(0u32..5),
                prop::option::of(0u32..4),
                prop::option::of(1u32..4),
                0i64..5,
                prop_oneof![Just("Yalı"), Just("Merkez")],
            ),
            0..25,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (price, size, rooms, day, n))| {
                    // coarse values so that ties are common
                    let mut l = listing(&i.to_string(), n, price.map(|p| f64::from(p) * 100_000.0), rooms);
                    l.features.size_m2 = size.map(|s| f64::from(s) * 50.0);
                    created_on_day(l, day)
                })
                .collect()
        })
    }

    fn arb_strategy() -> impl Strategy<Value = SortStrategy> {
        prop::sample::select(SortStrategy::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn sorting_is_idempotent(listings in arb_listings(), strategy in arb_strategy()) {
            let refs: Vec<&Listing> = listings.iter().collect();
            let reference = listings.first();
            let once = sort_listings(&refs, strategy, reference);
            let twice = sort_listings(&once, strategy, reference);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn equal_keys_keep_input_order(listings in arb_listings(), strategy in arb_strategy()) {
            let refs: Vec<&Listing> = listings.iter().collect();
            let reference = listings.first();
            let sorted = sort_listings(&refs, strategy, reference);
            let key = |l: &Listing| -> (i64, i64) {
                match strategy {
                    SortStrategy::Similarity => (reference.map_or(0, |r| i64::from(similarity_score(l, r))), 0),
                    SortStrategy::PriceAsc | SortStrategy::PriceDesc => (price_key(l) as i64, 0),
                    SortStrategy::SizeAsc | SortStrategy::SizeDesc => (size_key(l) as i64, 0),
                    SortStrategy::Newest => (l.created_at.timestamp(), 0),
                }
            };
            for pair in sorted.windows(2) {
                if key(pair[0]) == key(pair[1]) {
                    let a: usize = pair[0].id.parse().unwrap();
                    let b: usize = pair[1].id.parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }
    }
}
