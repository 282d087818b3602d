use crate::models::{Hotel, Purpose, ScoringParams, UserInput};

/// Clamp a value into `[lo, hi]`
#[inline]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.min(hi).max(lo)
}

/// Price and rating weights for a travel purpose
#[inline]
pub fn purpose_weights(purpose: &Purpose) -> (f64, f64) {
    match purpose {
        Purpose::Leisure | Purpose::Family | Purpose::Premium => (0.4, 0.6),
        Purpose::Business => (0.6, 0.4),
        Purpose::Budget | Purpose::LongTerm => (0.7, 0.3),
        Purpose::Other(_) => (0.5, 0.5),
    }
}

/// Calculate how well a price fits a budget bucket (0-1)
///
/// Inside the bucket the fit peaks at the midpoint and drops linearly
/// to `1 - lambda` at either edge. Outside it decays linearly with the
/// distance to the nearest edge, scaled by `tau_low` or `tau_high`.
#[inline]
pub fn price_fit(price: f64, budget_min: f64, budget_max: f64, params: &ScoringParams) -> f64 {
    let mid = (budget_min + budget_max) / 2.0;
    let width = (budget_max - budget_min).max(1.0);

    let value = if price >= budget_min && price <= budget_max {
        1.0 - params.lambda * (2.0 * (price - mid).abs() / width)
    } else if price < budget_min {
        1.0 - (budget_min - price) / params.tau_low
    } else {
        1.0 - (price - budget_max) / params.tau_high
    };

    clamp(value, 0.0, 1.0)
}

/// Normalize a 0-10 rating to 0-1
#[inline]
pub fn rating_fit(rating: f64) -> f64 {
    clamp(rating / 10.0, 0.0, 1.0)
}

/// Calculate a recommendation score (0-1) for a hotel
///
/// Scoring formula:
/// score = w_price * price_fit + w_rating * rating_fit
///
/// where the weights depend on the stay's purpose. The budget bounds are
/// passed separately so callers can score against a widened budget.
pub fn compute_score(
    hotel: &Hotel,
    input: &UserInput,
    budget_min: f64,
    budget_max: f64,
    params: &ScoringParams,
) -> f64 {
    let (w_price, w_rating) = purpose_weights(&input.purpose);
    let pf = price_fit(hotel.price, budget_min, budget_max, params);
    let rf = rating_fit(hotel.rating);

    w_price * pf + w_rating * rf
}
