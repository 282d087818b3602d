use serde::{Deserialize, Serialize};
use crate::models::domain::{Hotel, ScrapedListing};

/// Hotel as returned over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOut {
    pub id: u32,
    pub name: String,
    pub district: String,
    pub price: f64,
    pub rating: f64,
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f64>,
}

impl HotelOut {
    pub fn scored(hotel: &Hotel, score: f64) -> Self {
        Self {
            score: Some(score),
            ..Self::from(hotel)
        }
    }
}

impl From<&Hotel> for HotelOut {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name.clone(),
            district: hotel.district.clone(),
            price: hotel.price,
            rating: hotel.rating,
            amenities: hotel.amenities.clone(),
            score: None,
        }
    }
}

/// How a recommendation was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMeta {
    pub attempts: u32,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tau_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub results: Vec<HotelOut>,
    pub meta: SearchMeta,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub hotels: usize,
    /// "ok" or "unreachable" when the catalog is backed by sqlite
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub database: Option<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Scrape run response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub listings: Vec<ScrapedListing>,
    pub output: Option<String>,
}
