pub mod file;
pub mod rest;
pub mod traits;

pub use file::JsonFileSource;
pub use rest::{RestSource, RestSourceConfig};
pub use traits::ListingSource;

use crate::models::Listing;
use tracing::{info, warn};

/// Fetch a snapshot and normalize every listing.
///
/// A failing source is logged and yields an empty snapshot, so the page
/// renders its empty state instead of an error.
pub async fn load_snapshot(source: &dyn ListingSource) -> Vec<Listing> {
    match source.fetch().await {
        Ok(listings) => {
            info!("Loaded {} listings from {}", listings.len(), source.source_name());
            listings.into_iter().map(Listing::normalized).collect()
        }
        Err(err) => {
            warn!("{} failed, using empty snapshot: {:#}", source.source_name(), err);
            Vec::new()
        }
    }
}

/// Decode backend rows one at a time.
///
/// A row that does not fit the model is logged and skipped; it never takes
/// the rest of the snapshot down with it.
pub fn decode_rows(rows: Vec<serde_json::Value>, origin: &str) -> Vec<Listing> {
    let total = rows.len();
    let listings: Vec<Listing> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let id = row.get("id").map(|id| id.to_string());
            match serde_json::from_value::<Listing>(row) {
                Ok(listing) => Some(listing),
                Err(err) => {
                    warn!(
                        "Skipping row {} (id {}) from {}: {}",
                        index,
                        id.as_deref().unwrap_or("?"),
                        origin,
                        err
                    );
                    None
                }
            }
        })
        .collect();

    if listings.len() < total {
        warn!("Skipped {} of {} rows from {}", total - listings.len(), total, origin);
    }
    listings
}
