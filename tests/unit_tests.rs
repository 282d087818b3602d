// Unit tests for Hotel Recommender

use chrono::NaiveDate;
use hotel_recommender::core::{
    filters::{hard_filter, is_available, rating_floor},
    scoring::{compute_score, price_fit, rating_fit},
};
use hotel_recommender::models::{Hotel, Purpose, RecommendRequest, ScoringParams, UserInput};
use validator::Validate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_input(purpose: &str) -> UserInput {
    UserInput {
        district: "Quận 3".to_string(),
        budget_min: 900_000.0,
        budget_max: 1_400_000.0,
        purpose: Purpose::from(purpose),
        check_in: date(2025, 11, 14),
        check_out: date(2025, 11, 15),
    }
}

#[test]
fn test_price_fit_peaks_at_midpoint() {
    let params = ScoringParams::default();
    let mid = price_fit(1_150_000.0, 900_000.0, 1_400_000.0, &params);
    let off = price_fit(1_000_000.0, 900_000.0, 1_400_000.0, &params);

    assert_eq!(mid, 1.0);
    assert!(off < mid && off > 0.75);
}

#[test]
fn test_price_fit_penalty_scales_with_tau() {
    let strict = ScoringParams::default();
    let lenient = ScoringParams { tau_high: 300_000.0, ..strict };

    let over_strict = price_fit(1_550_000.0, 900_000.0, 1_400_000.0, &strict);
    let over_lenient = price_fit(1_550_000.0, 900_000.0, 1_400_000.0, &lenient);

    assert!((over_strict - 0.25).abs() < 1e-9);
    assert!((over_lenient - 0.5).abs() < 1e-9);
}

#[test]
fn test_rating_fit_bounds() {
    assert_eq!(rating_fit(0.0), 0.0);
    assert_eq!(rating_fit(10.0), 1.0);
}

#[test]
fn test_score_within_valid_range() {
    let params = ScoringParams::default();
    let input = create_input("leisure");

    for price in [0.0, 500_000.0, 1_150_000.0, 5_000_000.0] {
        for rating in [0.0, 5.5, 9.9] {
            let hotel = Hotel::new(1, "H", "Quận 3", price, rating);
            let score = compute_score(&hotel, &input, input.budget_min, input.budget_max, &params);
            assert!((0.0..=1.0).contains(&score), "Score {} out of range", score);
        }
    }
}

#[test]
fn test_hard_filter_keeps_order_and_drops_failures() {
    let mut unavailable = Hotel::new(4, "Closed", "Quận 3", 1_000_000.0, 9.0);
    unavailable.available_from = date(2025, 12, 1);

    let hotels = vec![
        Hotel::new(1, "A", "Quận 3", 1_000_000.0, 8.0),
        Hotel::new(2, "Low rated", "Quận 3", 1_000_000.0, 6.5),
        Hotel::new(3, "Elsewhere", "Quận 1", 1_000_000.0, 9.0),
        unavailable,
        Hotel::new(5, "B", "Quận 3", 2_000_000.0, 7.0),
    ];

    let ids: Vec<u32> = hard_filter(&hotels, &create_input("family"))
        .iter()
        .map(|h| h.id)
        .collect();
    assert_eq!(ids, vec![1, 5]);

    // Budget purpose has a lower floor
    let ids: Vec<u32> = hard_filter(&hotels, &create_input("budget"))
        .iter()
        .map(|h| h.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 5]);
}

#[test]
fn test_rating_floors() {
    assert_eq!(rating_floor(&Purpose::Leisure), 7.0);
    assert_eq!(rating_floor(&Purpose::Premium), 7.5);
    assert_eq!(rating_floor(&Purpose::LongTerm), 6.0);
}

#[test]
fn test_availability_needs_full_stay() {
    let hotel = Hotel::new(1, "H", "Quận 3", 1.0, 8.0);
    assert!(is_available(&hotel, date(2025, 6, 1), date(2025, 6, 3)));
    assert!(!is_available(&hotel, date(2025, 12, 30), date(2026, 1, 2)));
}

#[test]
fn test_purpose_parsing() {
    assert_eq!(Purpose::from("  business "), Purpose::Business);
    assert_eq!(Purpose::from("long_term"), Purpose::LongTerm);
    assert_eq!(Purpose::from("spa"), Purpose::Other("spa".to_string()));
    assert_eq!(String::from(Purpose::LongTerm), "long_term");
}

#[test]
fn test_request_deserialization_and_validation() {
    let req: RecommendRequest = serde_json::from_str(
        r#"{
            "district": "  Quận 3 ",
            "budget_min": 900000,
            "budget_max": 1400000,
            "purpose": " business",
            "check_in": "2025-11-14",
            "check_out": "2025-11-15",
            "topN": 3
        }"#,
    )
    .unwrap();

    assert_eq!(req.district, "Quận 3");
    assert_eq!(req.purpose, Purpose::Business);
    assert_eq!(req.top_n, Some(3));
    assert!(req.validate().is_ok());
}

#[test]
fn test_request_validation_failures() {
    let valid: RecommendRequest = serde_json::from_str(
        r#"{"district": "Quận 3", "budget_min": 900000, "budget_max": 1400000,
            "purpose": "business", "check_in": "2025-11-14", "check_out": "2025-11-15"}"#,
    )
    .unwrap();
    assert_eq!(valid.top_n, None);

    let mut inverted_budget = valid.clone();
    inverted_budget.budget_max = 100.0;
    assert!(inverted_budget.validate().is_err());

    let mut inverted_dates = valid.clone();
    inverted_dates.check_out = date(2025, 11, 13);
    assert!(inverted_dates.validate().is_err());

    let mut too_many = valid.clone();
    too_many.top_n = Some(21);
    assert!(too_many.validate().is_err());

    let mut blank_district = valid.clone();
    blank_district.district = String::new();
    assert!(blank_district.validate().is_err());

    let mut negative = valid;
    negative.budget_min = -1.0;
    assert!(negative.validate().is_err());
}

#[test]
fn test_request_rejects_bad_date_format() {
    let result: Result<RecommendRequest, _> = serde_json::from_str(
        r#"{"district": "Quận 3", "budget_min": 0, "budget_max": 1,
            "purpose": "business", "check_in": "14/11/2025", "check_out": "2025-11-15"}"#,
    );
    assert!(result.is_err());
}
