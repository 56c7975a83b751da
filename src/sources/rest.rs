use crate::models::{Listing, PropertyType, Status};
use crate::sources::decode_rows;
use crate::sources::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for the hosted backend's REST table endpoint
#[derive(Debug, Clone)]
pub struct RestSourceConfig {
    /// Full table URL, e.g. `https://<project>.supabase.co/rest/v1/listings`
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Coarse filters pushed down to the backend
    pub status: Option<Status>,
    pub property_type: Option<PropertyType>,
    pub published_only: bool,
}

impl RestSourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
            status: None,
            property_type: None,
            published_only: true,
        }
    }

    /// PostgREST query parameters for the pushed-down filters
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("select", "*".to_string())];
        if let Some(status) = self.status {
            params.push(("status", format!("eq.{}", status)));
        }
        if let Some(property_type) = self.property_type {
            params.push(("property_type", format!("eq.{}", property_type)));
        }
        if self.published_only {
            params.push(("published", "eq.true".to_string()));
        }
        params
    }
}

/// Fetches listings straight from the backend
pub struct RestSource {
    client: Client,
    config: RestSourceConfig,
}

impl RestSource {
    pub fn new(config: RestSourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("listing-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ListingSource for RestSource {
    async fn fetch(&self) -> Result<Vec<Listing>> {
        debug!("Fetching listings from {}", self.config.url);

        let mut request = self
            .client
            .get(&self.config.url)
            .query(&self.config.query_params());
        if let Some(key) = &self.config.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("Failed to fetch listings")?;

        if !response.status().is_success() {
            warn!("Backend returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listings: {}", response.status());
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .context("Failed to decode listings response")?;

        debug!("Received {} rows", rows.len());
        Ok(decode_rows(rows, self.source_name()))
    }

    fn source_name(&self) -> &'static str {
        "REST backend"
    }
}
