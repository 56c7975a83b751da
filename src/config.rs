//! Command line and environment configuration.

use crate::models::{BooleanFeature, PropertyType, Status};
use crate::pipeline::{FilterSpec, SearchRequest, SortStrategy, RELATED_PAGE_SIZE, SEARCH_PAGE_SIZE};
use crate::sources::{JsonFileSource, ListingSource, RestSource, RestSourceConfig};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Search, rank and page a real-estate listing snapshot
#[derive(Parser, Debug)]
#[command(name = "listing-scout", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the snapshot comes from. A local file wins over the backend.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON file holding an array of listings
    #[arg(long, env = "LISTINGS_SNAPSHOT", global = true)]
    pub snapshot: Option<PathBuf>,

    /// REST table endpoint of the hosted backend
    #[arg(long, env = "LISTINGS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Backend API key, sent as `apikey` and bearer token
    #[arg(long, env = "LISTINGS_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Request timeout for the backend
    #[arg(long, env = "LISTINGS_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Also load unpublished listings from the backend
    #[arg(long, global = true)]
    pub include_unpublished: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter, sort and page the snapshot
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// similarity, price-asc, price-desc, size-asc, size-desc or newest
        #[arg(long, default_value_t = SortStrategy::Similarity)]
        sort: SortStrategy,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = SEARCH_PAGE_SIZE)]
        page_size: usize,

        /// Listing id to rank similarity against
        #[arg(long)]
        reference: Option<String>,

        /// Read the whole request as JSON instead of from flags
        #[arg(long, conflicts_with_all = ["sort", "page", "page_size", "reference"])]
        request: Option<PathBuf>,
    },
    /// Listings similar to one listing, most similar first
    Related {
        /// Id of the reference listing
        #[arg(long)]
        id: String,

        /// "Show more" page
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = RELATED_PAGE_SIZE)]
        page_size: usize,
    },
    /// Aggregate statistics over the filtered snapshot
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Filter flags shared by `search` and `stats`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub status: Option<Status>,

    #[arg(long = "type")]
    pub property_type: Option<PropertyType>,

    /// Partial neighborhood name
    #[arg(long)]
    pub neighborhood: Option<String>,

    /// Free-text query over title, description, neighborhood and type
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    #[arg(long)]
    pub price_min: Option<f64>,

    #[arg(long)]
    pub price_max: Option<f64>,

    #[arg(long)]
    pub size_min: Option<f64>,

    #[arg(long)]
    pub size_max: Option<f64>,

    /// Accepted room count, repeatable
    #[arg(long = "rooms")]
    pub rooms: Vec<u32>,

    /// Accepted bathroom count, repeatable
    #[arg(long = "bathrooms")]
    pub bathrooms: Vec<u32>,

    /// Required amenity (parking, elevator, sea-view, balcony, furnished), repeatable
    #[arg(long = "feature")]
    pub features: Vec<BooleanFeature>,

    #[arg(long)]
    pub heating: Option<String>,

    /// Maximum building age in years
    #[arg(long)]
    pub max_age: Option<u32>,

    /// Only featured listings
    #[arg(long)]
    pub featured: bool,
}

impl FilterArgs {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            status: self.status,
            property_type: self.property_type,
            neighborhood_query: self.neighborhood.clone(),
            price_min: self.price_min,
            price_max: self.price_max,
            size_min: self.size_min,
            size_max: self.size_max,
            rooms: self.rooms.iter().copied().collect(),
            bathrooms: self.bathrooms.iter().copied().collect(),
            boolean_features: self.features.iter().copied().collect(),
            free_text_query: self.query.clone(),
            heating: self.heating.clone(),
            max_building_age: self.max_age,
            featured: self.featured.then_some(true),
            published: None,
        }
    }
}

impl SourceArgs {
    /// Build the configured snapshot source.
    pub fn build(&self) -> Result<Box<dyn ListingSource>> {
        if let Some(path) = &self.snapshot {
            return Ok(Box::new(JsonFileSource::new(path.clone())));
        }

        let url = self
            .api_url
            .clone()
            .context("No snapshot source: pass --snapshot or set LISTINGS_API_URL")?;
        let mut config = RestSourceConfig::new(url);
        config.api_key = self.api_key.clone();
        config.timeout = Duration::from_secs(self.timeout_secs);
        config.published_only = !self.include_unpublished;

        Ok(Box::new(RestSource::new(config)?))
    }
}

/// Assemble a search request from flags, or read it from a JSON file.
pub async fn search_request(
    filter: &FilterArgs,
    sort: SortStrategy,
    page: usize,
    page_size: usize,
    reference: Option<String>,
    request_file: Option<&PathBuf>,
) -> Result<SearchRequest> {
    if let Some(path) = request_file {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse search request in {}", path.display()));
    }

    Ok(SearchRequest {
        filter: filter.to_spec(),
        sort,
        page,
        page_size,
        reference_id: reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_flags() {
        let cli = Cli::try_parse_from([
            "listing-scout",
            "--snapshot",
            "listings.json",
            "search",
            "--status",
            "for-sale",
            "--type",
            "villa",
            "--rooms",
            "3",
            "--rooms",
            "4",
            "--feature",
            "sea-view",
            "-q",
            "havuz",
            "--sort",
            "price-desc",
            "--page",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.source.snapshot, Some(PathBuf::from("listings.json")));
        match cli.command {
            Command::Search {
                filter, sort, page, page_size, ..
            } => {
                let spec = filter.to_spec();
                assert_eq!(spec.status, Some(Status::ForSale));
                assert_eq!(spec.property_type, Some(PropertyType::Villa));
                assert_eq!(spec.rooms.len(), 2);
                assert!(spec.boolean_features.contains(&BooleanFeature::SeaView));
                assert_eq!(spec.free_text_query.as_deref(), Some("havuz"));
                assert_eq!(spec.featured, None);
                assert_eq!(sort, SortStrategy::PriceDesc);
                assert_eq!(page, 2);
                assert_eq!(page_size, SEARCH_PAGE_SIZE);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_sort() {
        let parsed = Cli::try_parse_from(["listing-scout", "search", "--sort", "cheapest"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn related_defaults_to_show_more_page_size() {
        let cli = Cli::try_parse_from(["listing-scout", "related", "--id", "42"]).unwrap();
        match cli.command {
            Command::Related { id, page, page_size } => {
                assert_eq!(id, "42");
                assert_eq!(page, 1);
                assert_eq!(page_size, RELATED_PAGE_SIZE);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn snapshot_file_wins_over_backend() {
        let args = SourceArgs {
            snapshot: Some(PathBuf::from("listings.json")),
            api_url: Some("http://localhost/rest/v1/listings".to_string()),
            api_key: None,
            timeout_secs: 10,
            include_unpublished: false,
        };
        assert_eq!(args.build().unwrap().source_name(), "JSON file");
    }

    #[test]
    fn missing_source_is_an_error() {
        let args = SourceArgs {
            snapshot: None,
            api_url: None,
            api_key: None,
            timeout_secs: 10,
            include_unpublished: false,
        };
        assert!(args.build().is_err());
    }

    #[tokio::test]
    async fn builds_request_from_flags() {
        let filter = FilterArgs {
            featured: true,
            ..FilterArgs::default()
        };
        let request = search_request(&filter, SortStrategy::Newest, 3, 18, None, None)
            .await
            .unwrap();
        assert_eq!(request.filter.featured, Some(true));
        assert_eq!(request.sort, SortStrategy::Newest);
        assert_eq!(request.page, 3);
    }
}
