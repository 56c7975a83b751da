//! Summary numbers shown above the result list.

use crate::models::{Listing, PropertyType, Status};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregates over the current (filtered) result set
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ListingStats {
    pub count: usize,
    /// Listings with a known price
    pub priced_count: usize,
    /// Mean over priced listings only; unpriced ones are not counted as zero
    pub average_price: Option<f64>,
    pub average_price_per_m2: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub featured_count: usize,
    pub by_status: BTreeMap<Status, usize>,
    pub by_property_type: BTreeMap<PropertyType, usize>,
}

impl ListingStats {
    pub fn compute<'a, I>(listings: I) -> Self
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        let mut stats = ListingStats::default();
        let mut price_sum = 0.0;
        let mut per_m2_sum = 0.0;
        let mut per_m2_count = 0usize;

        for listing in listings {
            stats.count += 1;
            if listing.featured {
                stats.featured_count += 1;
            }
            *stats.by_status.entry(listing.status).or_insert(0) += 1;
            *stats.by_property_type.entry(listing.property_type).or_insert(0) += 1;

            if let Some(price) = listing.price {
                stats.priced_count += 1;
                price_sum += price;
                stats.min_price = Some(stats.min_price.map_or(price, |m| m.min(price)));
                stats.max_price = Some(stats.max_price.map_or(price, |m| m.max(price)));
            }
            if let Some(per_m2) = listing.price_per_m2() {
                per_m2_count += 1;
                per_m2_sum += per_m2;
            }
        }

        stats.average_price = mean(price_sum, stats.priced_count);
        stats.average_price_per_m2 = mean(per_m2_sum, per_m2_count);
        stats
    }

    /// How far `listing` sits from this set's average price, in percent.
    pub fn price_delta_percent(&self, listing: &Listing) -> Option<f64> {
        price_delta_percent(listing, self.average_price)
    }
}

fn mean(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

/// `(price - average) / average * 100`, or `None` when there is nothing to
/// compare against (no price, no average, or an average of zero).
pub fn price_delta_percent(listing: &Listing, average: Option<f64>) -> Option<f64> {
    let price = listing.price?;
    let average = average.filter(|a| *a != 0.0 && a.is_finite())?;
    Some((price - average) / average * 100.0)
}
