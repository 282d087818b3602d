// Service exports
pub mod cache;
pub mod catalog;
pub mod scraper;
pub mod sqlite;

pub use cache::{CacheManager, CacheKey, CacheError};
pub use catalog::{HotelCatalog, CatalogError, DataSource};
pub use scraper::{BookingScraper, ScraperConfig, ScraperError, ScrapeOutcome};
pub use sqlite::{SqliteStore, StoreError};
