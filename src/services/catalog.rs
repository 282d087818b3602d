use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use crate::config::DataSettings;
use crate::core::{generate_mock_hotels, matches_search};
use crate::models::{Hotel, HotelFilter};
use crate::services::sqlite::{SqliteStore, StoreError};

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid hotel data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),
}

/// Where the catalog is loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Mock,
    Json,
    Sqlite,
}

/// In-memory hotel catalog
///
/// Loaded once at startup and shared read-only between workers.
#[derive(Debug, Clone, Default)]
pub struct HotelCatalog {
    hotels: Vec<Hotel>,
}

impl HotelCatalog {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }

    /// Load the catalog from the configured data source
    ///
    /// The sqlite store is handed back when it was the source so callers
    /// can keep checking its health.
    pub async fn load(settings: &DataSettings) -> Result<(Self, Option<SqliteStore>), CatalogError> {
        match settings.source {
            DataSource::Mock => Ok((Self::mock(settings.mock_count, settings.mock_seed), None)),
            DataSource::Json => {
                let path = settings
                    .json_path
                    .as_ref()
                    .ok_or(CatalogError::MissingSetting("data.json_path"))?;
                Ok((Self::from_json_file(path)?, None))
            }
            DataSource::Sqlite => {
                let url = settings
                    .sqlite_url
                    .as_deref()
                    .ok_or(CatalogError::MissingSetting("data.sqlite_url"))?;
                let store = SqliteStore::connect(url, settings.sqlite_max_connections.unwrap_or(5)).await?;
                let catalog = Self::from_sqlite(&store).await?;
                Ok((catalog, Some(store)))
            }
        }
    }

    /// Deterministic generated catalog
    pub fn mock(count: usize, seed: u64) -> Self {
        let catalog = Self::new(generate_mock_hotels(count, seed));
        tracing::info!("Loaded {} mock hotels (seed {})", catalog.len(), seed);
        catalog
    }

    /// Catalog from a JSON array of hotels
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_json_str(&contents)?;
        tracing::info!("Loaded {} hotels from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        let hotels: Vec<Hotel> = serde_json::from_str(contents)?;
        Ok(Self::new(hotels))
    }

    /// Catalog from the `hotels` table of a sqlite database
    pub async fn from_sqlite(store: &SqliteStore) -> Result<Self, CatalogError> {
        let catalog = Self::new(store.load_hotels().await?);
        tracing::info!("Loaded {} hotels from sqlite", catalog.len());
        Ok(catalog)
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Hotel> {
        self.hotels.iter().find(|hotel| hotel.id == id)
    }

    /// Distinct districts, sorted
    pub fn districts(&self) -> Vec<String> {
        self.hotels
            .iter()
            .map(|hotel| hotel.district.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Hotels matching a filter, ordered by id
    pub fn list(&self, filter: &HotelFilter) -> Vec<&Hotel> {
        let mut hotels: Vec<&Hotel> = self
            .hotels
            .iter()
            .filter(|hotel| matches_search(hotel, filter))
            .collect();
        hotels.sort_by_key(|hotel| hotel.id);
        hotels
    }

    /// Hotels matching a filter, best rated first, cheaper first on ties
    pub fn search(&self, filter: &HotelFilter, limit: usize) -> Vec<&Hotel> {
        let mut hotels = self.list(filter);
        hotels.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.price
                        .partial_cmp(&b.price)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });
        hotels.truncate(limit);
        hotels
    }
}
