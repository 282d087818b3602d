// Core algorithm exports
pub mod filters;
pub mod mock;
pub mod recommender;
pub mod scoring;

pub use filters::{hard_filter, is_available, matches_search, passes_hard_filter, rating_floor};
pub use mock::generate_mock_hotels;
pub use recommender::{Recommender, RecommendResult, DEFAULT_MAX_ATTEMPTS};
pub use scoring::{compute_score, price_fit, purpose_weights, rating_fit};
