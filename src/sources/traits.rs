use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for everything that can produce a listing snapshot.
/// The pipeline only ever sees the `Vec<Listing>` this returns.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the current snapshot
    async fn fetch(&self) -> Result<Vec<Listing>>;

    /// Get the name of the source, for logs
    fn source_name(&self) -> &'static str;
}
