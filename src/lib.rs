//! Hotel Recommender - hotel search and recommendation service
//!
//! This library provides the catalog, the scoring and budget-expansion
//! recommender, the listing scraper and the HTTP routes of the service.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Recommender, generate_mock_hotels, price_fit, compute_score};
pub use models::{Hotel, Purpose, UserInput, ScoringParams, HotelOut, SearchMeta, RecommendRequest, RecommendResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let params = ScoringParams::default();
        assert_eq!(price_fit(1_000.0, 500.0, 1_500.0, &params), 1.0);
    }
}
