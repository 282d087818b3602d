use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hotel record as held in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: u32,
    pub name: String,
    pub district: String,
    pub price: f64,
    pub rating: f64,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_available_from")]
    pub available_from: NaiveDate,
    #[serde(default = "default_available_to")]
    pub available_to: NaiveDate,
}

impl Hotel {
    /// Build a hotel with default capacity and a full-year 2025 availability window
    pub fn new(id: u32, name: impl Into<String>, district: impl Into<String>, price: f64, rating: f64) -> Self {
        Self {
            id,
            name: name.into(),
            district: district.into(),
            price,
            rating,
            capacity: default_capacity(),
            amenities: Vec::new(),
            available_from: default_available_from(),
            available_to: default_available_to(),
        }
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a.eq_ignore_ascii_case(amenity))
    }
}

fn default_capacity() -> u32 { 1 }

pub(crate) fn default_available_from() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

pub(crate) fn default_available_to() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default()
}

/// Travel purpose of a stay
///
/// Unknown purposes are kept verbatim and fall back to neutral weights.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Purpose {
    Leisure,
    Business,
    Family,
    Budget,
    Premium,
    LongTerm,
    Other(String),
}

impl Purpose {
    pub fn as_str(&self) -> &str {
        match self {
            Purpose::Leisure => "leisure",
            Purpose::Business => "business",
            Purpose::Family => "family",
            Purpose::Budget => "budget",
            Purpose::Premium => "premium",
            Purpose::LongTerm => "long_term",
            Purpose::Other(other) => other,
        }
    }
}

impl From<String> for Purpose {
    fn from(value: String) -> Self {
        match value.trim() {
            "leisure" => Purpose::Leisure,
            "business" => Purpose::Business,
            "family" => Purpose::Family,
            "budget" => Purpose::Budget,
            "premium" => Purpose::Premium,
            "long_term" => Purpose::LongTerm,
            other => Purpose::Other(other.to_string()),
        }
    }
}

impl From<&str> for Purpose {
    fn from(value: &str) -> Self {
        Purpose::from(value.to_string())
    }
}

impl From<Purpose> for String {
    fn from(value: Purpose) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's stay preferences, already validated
#[derive(Debug, Clone, PartialEq)]
pub struct UserInput {
    pub district: String,
    pub budget_min: f64,
    pub budget_max: f64,
    pub purpose: Purpose,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl UserInput {
    /// Budget width, never below one currency unit
    pub fn budget_width(&self) -> f64 {
        (self.budget_max - self.budget_min).max(1.0)
    }
}

/// Tunables of the price-fit curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Penalty at the edges of the budget bucket
    pub lambda: f64,
    /// Scale of the penalty for prices below the budget
    pub tau_low: f64,
    /// Scale of the penalty for prices above the budget
    pub tau_high: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            lambda: 0.25,
            tau_low: 200_000.0,
            tau_high: 200_000.0,
        }
    }
}

/// Filters shared by the hotel listing and search endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelFilter {
    pub district: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub amenity: Option<String>,
}

/// One property card scraped from a search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedListing {
    pub name: String,
    pub score: String,
    pub price: String,
    pub address: String,
}
