use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{RecommendRequest, RecommendResponse};
use crate::services::{CacheError, CacheKey};
use super::{error_response, AppState};

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommend", web::post().to(recommend));
}

/// Recommend hotels endpoint
///
/// POST /api/recommend
///
/// Request body:
/// ```json
/// {
///   "district": "Quận 3",
///   "budget_min": 900000,
///   "budget_max": 1400000,
///   "purpose": "business",
///   "check_in": "2025-11-14",
///   "check_out": "2025-11-15",
///   "topN": 5
/// }
/// ```
///
/// Responds 204 when nothing matches even after relaxing the budget.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {}", errors);
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    let top_n = state.limits.resolve(req.top_n);

    tracing::info!(
        "Search request: district={} budget=[{},{}] purpose={} topN={}",
        req.district,
        req.budget_min,
        req.budget_max,
        req.purpose,
        top_n
    );

    let cache_key = CacheKey::recommend(&req, top_n);
    match state.cache.get::<RecommendResponse>(&cache_key).await {
        Ok(cached) => {
            tracing::debug!("Serving cached recommendation for {}", cache_key);
            return HttpResponse::Ok().json(cached);
        }
        Err(CacheError::CacheMiss(_)) => {}
        Err(e) => tracing::warn!("Cache lookup failed, computing fresh: {}", e),
    }

    let input = req.to_user_input();
    let result = state
        .recommender
        .recommend(state.catalog.hotels(), &input, top_n as usize);

    tracing::info!(
        "Recommendation: {} results from {} candidates (attempts={}, expanded={})",
        result.results.len(),
        result.total_candidates,
        result.meta.attempts,
        result.meta.expanded
    );

    if result.results.is_empty() {
        return HttpResponse::NoContent().finish();
    }

    let response = RecommendResponse {
        results: result.results,
        meta: result.meta,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache recommendation: {}", e);
    }

    HttpResponse::Ok().json(response)
}
