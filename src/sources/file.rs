use crate::models::Listing;
use crate::sources::decode_rows;
use crate::sources::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Snapshot saved as a JSON array of listings
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ListingSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Listing>> {
        debug!("Reading snapshot from {}", self.path.display());

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let rows: Vec<serde_json::Value> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse listings in {}", self.path.display()))?;

        Ok(decode_rows(rows, self.source_name()))
    }

    fn source_name(&self) -> &'static str {
        "JSON file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::load_snapshot;
    use std::io::Write;

    const SNAPSHOT: &str = r#"[
        {
            "id": "1",
            "slug": "yalikavak-villa",
            "title": "Havuzlu villa",
            "status": "for-sale",
            "property_type": "villa",
            "neighborhood": "Yalıkavak",
            "price": 12500000,
            "features": { "size_m2": 240, "room_count": 5 },
            "created_at": "2024-05-01T09:00:00Z",
            "updated_at": "2024-05-01T09:00:00Z"
        },
        {
            "id": "2",
            "slug": "merkez-daire",
            "status": "for-rent",
            "property_type": "apartment",
            "created_at": "2024-06-01T09:00:00Z",
            "updated_at": "2024-06-01T09:00:00Z"
        }
    ]"#;

    #[tokio::test]
    async fn reads_snapshot_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let source = JsonFileSource::new(file.path());
        let listings = source.fetch().await.unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].location.neighborhood, "Yalıkavak");
        assert_eq!(listings[0].features.room_count, Some(5));
        assert_eq!(listings[1].price, None);
        assert_eq!(listings[1].title, "");
    }

    #[tokio::test]
    async fn one_malformed_row_does_not_empty_the_snapshot() {
        let rows = r#"[
            {"id": "1", "slug": "a", "status": "for-sale", "property_type": "apartment",
             "features": {"floor": 2},
             "created_at": "2024-05-01T09:00:00Z", "updated_at": "2024-05-01T09:00:00Z"},
            {"id": "2", "slug": "b", "status": "Satılık", "property_type": "apartment",
             "features": {"floor": "Zemin"},
             "created_at": "2024-05-01T09:00:00Z", "updated_at": "2024-05-01T09:00:00Z"},
            {"id": "3", "slug": "c", "status": "for-rent", "property_type": "villa",
             "created_at": "2024-05-01T09:00:00Z", "updated_at": "2024-05-01T09:00:00Z"},
            {"id": "4", "slug": "d", "status": "sold", "property_type": "villa",
             "created_at": "2024-05-01T09:00:00Z", "updated_at": "2024-05-01T09:00:00Z"}
        ]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(rows.as_bytes()).unwrap();

        let source = JsonFileSource::new(file.path());
        let snapshot = load_snapshot(&source).await;

        let ids: Vec<&str> = snapshot.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(snapshot[1].features.floor, Some(0));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("absent.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let source = JsonFileSource::new(file.path());
        assert!(source.fetch().await.is_err());
    }
}
