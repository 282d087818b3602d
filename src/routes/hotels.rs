use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{HealthResponse, HotelOut, HotelQuery, SearchQuery};
use super::{error_response, AppState};

/// Default and maximum page size of the search endpoint
const DEFAULT_SEARCH_LIMIT: usize = 20;
const MAX_SEARCH_LIMIT: usize = 100;

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/ping", web::get().to(ping))
        .route("/districts", web::get().to(get_districts))
        .route("/hotels", web::get().to(list_hotels))
        .route("/hotels/{hotel_id}", web::get().to(get_hotel))
        .route("/search", web::get().to(search_hotels));
}

/// Health check endpoint
///
/// Degraded when the catalog is empty or its sqlite store is unreachable.
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let hotels = state.catalog.len();

    let db_healthy = match &state.store {
        Some(store) => Some(match store.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!("sqlite health check failed: {}", e);
                false
            }
        }),
        None => None,
    };

    let status = if hotels > 0 && db_healthy != Some(false) { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        hotels,
        database: db_healthy.map(|ok| if ok { "ok" } else { "unreachable" }.to_string()),
    })
}

async fn ping() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/districts
///
/// Distinct districts of the loaded catalog, sorted.
async fn get_districts(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.districts())
}

/// GET /api/hotels?district=&min_price=&max_price=&min_rating=&amenity=
async fn list_hotels(
    state: web::Data<AppState>,
    query: web::Query<HotelQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    let hotels: Vec<HotelOut> = state
        .catalog
        .list(&query.to_filter())
        .into_iter()
        .map(HotelOut::from)
        .collect();

    HttpResponse::Ok().json(hotels)
}

/// GET /api/hotels/{hotel_id}
async fn get_hotel(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> impl Responder {
    let hotel_id = path.into_inner();

    match state.catalog.get(hotel_id) {
        Some(hotel) => HttpResponse::Ok().json(HotelOut::from(hotel)),
        None => {
            tracing::debug!("Hotel {} not found", hotel_id);
            error_response(StatusCode::NOT_FOUND, "not_found", "hotel not found")
        }
    }
}

/// GET /api/search
///
/// Same filters as the listing, ranked by rating then price.
async fn search_hotels(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT);
    let filter = query.to_filter();

    let hotels: Vec<HotelOut> = state
        .catalog
        .search(&filter, limit)
        .into_iter()
        .map(HotelOut::from)
        .collect();

    tracing::info!("Search {:?} returned {} hotels", filter, hotels.len());

    HttpResponse::Ok().json(hotels)
}
