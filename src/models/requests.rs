use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{HotelFilter, Purpose, UserInput};

/// Request to recommend hotels
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_recommend_request", skip_on_field_errors = false))]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "trimmed")]
    pub district: String,
    #[validate(range(min = 0.0))]
    pub budget_min: f64,
    #[validate(range(min = 0.0))]
    pub budget_max: f64,
    pub purpose: Purpose,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = 20))]
    #[serde(alias = "top_n", rename = "topN", default)]
    pub top_n: Option<u32>,
}

impl RecommendRequest {
    pub fn to_user_input(&self) -> UserInput {
        UserInput {
            district: self.district.clone(),
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            purpose: self.purpose.clone(),
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }
}

fn validate_recommend_request(req: &RecommendRequest) -> Result<(), ValidationError> {
    if req.budget_max < req.budget_min {
        let mut err = ValidationError::new("budget_range");
        err.message = Some("budget_max must be >= budget_min".into());
        return Err(err);
    }
    if req.check_out < req.check_in {
        let mut err = ValidationError::new("stay_dates");
        err.message = Some("check_out must be >= check_in".into());
        return Err(err);
    }
    Ok(())
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Query string of the hotel listing endpoint
///
/// Unknown parameters are rejected, `limit` included: listing is never paged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct HotelQuery {
    pub district: Option<String>,
    #[validate(range(min = 0.0))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_price: Option<f64>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub min_rating: Option<f64>,
    pub amenity: Option<String>,
}

impl HotelQuery {
    pub fn to_filter(&self) -> HotelFilter {
        HotelFilter {
            district: non_blank(&self.district),
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            amenity: non_blank(&self.amenity),
        }
    }
}

/// Query string of the search endpoint: listing filters plus a page size
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SearchQuery {
    pub district: Option<String>,
    #[validate(range(min = 0.0))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_price: Option<f64>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub min_rating: Option<f64>,
    pub amenity: Option<String>,
    /// Capped by the handler, never rejected for being large
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn to_filter(&self) -> HotelFilter {
        HotelFilter {
            district: non_blank(&self.district),
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            amenity: non_blank(&self.amenity),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
