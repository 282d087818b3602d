// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Hotel, Purpose, UserInput, ScoringParams, HotelFilter, ScrapedListing};
pub use requests::{RecommendRequest, HotelQuery, SearchQuery};
pub use responses::{HotelOut, SearchMeta, RecommendResponse, HealthResponse, ErrorResponse, ScrapeResponse};
