use crate::models::{Hotel, HotelOut, ScoringParams, SearchMeta, UserInput};
use crate::core::{filters::hard_filter, scoring::compute_score};

/// Number of relaxation passes tried after an empty first pass
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendResult {
    pub results: Vec<HotelOut>,
    pub meta: SearchMeta,
    pub total_candidates: usize,
}

/// Main recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Hard filter (district, availability, rating floor)
/// 2. Scoring against the current budget bucket
/// 3. Ranking and truncation
/// 4. Relaxation when nothing scored: widen the budget by half its
///    width on both sides, then soften the over-budget penalty
#[derive(Debug, Clone)]
pub struct Recommender {
    params: ScoringParams,
    max_attempts: u32,
}

impl Recommender {
    pub fn new(params: ScoringParams, max_attempts: u32) -> Self {
        Self { params, max_attempts }
    }

    pub fn with_default_params() -> Self {
        Self {
            params: ScoringParams::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Recommend up to `top_n` hotels for a stay
    ///
    /// # Arguments
    /// * `hotels` - The whole catalog
    /// * `input` - Validated user preferences
    /// * `top_n` - Maximum number of hotels to return
    ///
    /// # Returns
    /// RecommendResult with the ranked hotels and how they were found.
    /// An empty result carries `reason = "no_results"` in its meta.
    pub fn recommend(&self, hotels: &[Hotel], input: &UserInput, top_n: usize) -> RecommendResult {
        let width = input.budget_width();
        let mut attempt: u32 = 0;
        let mut expanded = false;
        let mut current_min = input.budget_min;
        let mut current_max = input.budget_max;
        let mut params = self.params;

        // Availability and district don't depend on the budget, so the
        // candidate set is the same for every pass.
        let candidates = hard_filter(hotels, input);

        loop {
            let mut scored: Vec<(&Hotel, f64)> = candidates
                .iter()
                .map(|hotel| (*hotel, compute_score(hotel, input, current_min, current_max, &params)))
                .filter(|(_, score)| *score > 0.0)
                .collect();

            // Stable sort keeps catalog order between equal scores
            scored.sort_by(|a, b| {
                b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
            });
            scored.truncate(top_n);

            if !scored.is_empty() {
                let results = scored
                    .into_iter()
                    .map(|(hotel, score)| HotelOut::scored(hotel, round4(score)))
                    .collect();

                return RecommendResult {
                    results,
                    meta: SearchMeta {
                        attempts: attempt + 1,
                        expanded,
                        current_min: Some(current_min),
                        current_max: Some(current_max),
                        tau_high: Some(params.tau_high),
                        reason: None,
                    },
                    total_candidates: candidates.len(),
                };
            }

            if attempt >= self.max_attempts {
                return RecommendResult {
                    results: Vec::new(),
                    meta: SearchMeta {
                        attempts: attempt,
                        expanded,
                        current_min: None,
                        current_max: None,
                        tau_high: None,
                        reason: Some("no_results".to_string()),
                    },
                    total_candidates: candidates.len(),
                };
            }

            match attempt {
                0 => {
                    let delta = 0.5 * width;
                    current_min = (input.budget_min - delta).max(0.0);
                    current_max = input.budget_max + delta;
                    expanded = true;
                }
                1 => {
                    params.tau_high *= 1.5;
                }
                _ => {}
            }

            tracing::debug!(
                "Relaxing search (attempt {}): budget=[{}, {}], tau_high={}",
                attempt + 1,
                current_min,
                current_max,
                params.tau_high
            );

            attempt += 1;
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_params()
    }
}

/// Round to 4 decimals, ties to even
///
/// Goes through the exact decimal expansion rather than `value * 1e4`,
/// which can turn a value just below a tie into a tie.
#[inline]
fn round4(value: f64) -> f64 {
    format!("{:.4}", value).parse().unwrap_or(value)
}
