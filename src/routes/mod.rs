// Route exports
pub mod errors;
pub mod hotels;
pub mod recommend;
pub mod scrape;

use actix_web::web;
use std::sync::Arc;
use crate::core::Recommender;
use crate::services::{BookingScraper, CacheManager, HotelCatalog, SqliteStore};

pub use errors::{error_response, handle_json_payload_error, handle_path_error, handle_query_payload_error, JsonError};

/// Bounds on the number of recommendations per request
#[derive(Debug, Clone, Copy)]
pub struct TopNLimits {
    pub default_top_n: u32,
    pub max_top_n: u32,
}

impl TopNLimits {
    /// Requested count, defaulted and capped
    pub fn resolve(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_top_n)
            .clamp(1, self.max_top_n.max(1))
    }
}

impl Default for TopNLimits {
    fn default() -> Self {
        Self {
            default_top_n: 5,
            max_top_n: 20,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<HotelCatalog>,
    /// Present when the catalog was loaded from sqlite
    pub store: Option<SqliteStore>,
    pub recommender: Recommender,
    pub limits: TopNLimits,
    pub cache: Arc<CacheManager>,
    pub scraper: Arc<BookingScraper>,
    /// Held for the duration of a scrape run
    pub scrape_lock: Arc<tokio::sync::Mutex<()>>,
}

/// Register extractor error handlers and every route
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error))
        .configure(configure_routes);
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(hotels::health_check))
        .service(
            web::scope("/api")
                .configure(hotels::configure)
                .configure(recommend::configure)
                .configure(scrape::configure),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_n_limits() {
        let limits = TopNLimits::default();
        assert_eq!(limits.resolve(None), 5);
        assert_eq!(limits.resolve(Some(12)), 12);
        assert_eq!(limits.resolve(Some(50)), 20);
        assert_eq!(limits.resolve(Some(0)), 1);
    }
}
