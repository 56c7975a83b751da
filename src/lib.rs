//! Listing relevance and filter pipeline for a real-estate site.
//!
//! A snapshot of listings is loaded once through a [`sources::ListingSource`];
//! every user interaction then runs [`pipeline::run_search`] or
//! [`pipeline::related_listings`] over it from scratch.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod sources;

pub use error::ParseError;
pub use models::{BooleanFeature, Features, Listing, Location, PropertyType, Status};
pub use pipeline::{
    filter_listings, paginate, related_listings, run_search, similarity_score, sort_listings,
    FilterSpec, ListingStats, Page, SearchRequest, SearchResults, SortStrategy,
};
