use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use crate::models::ScrapeResponse;
use crate::services::{scraper::read_csv, ScraperError};
use super::{error_response, AppState};

/// Configure scraper routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/scrape", web::post().to(run_scrape))
        .route("/scraped", web::get().to(get_scraped));
}

/// POST /api/scrape
///
/// Runs the scraper once. Only one run at a time; a concurrent request
/// gets 409.
async fn run_scrape(state: web::Data<AppState>) -> impl Responder {
    let Ok(_guard) = state.scrape_lock.try_lock() else {
        return error_response(StatusCode::CONFLICT, "scrape_in_progress", "a scrape is already running");
    };

    tracing::info!("Starting scrape run");

    match state.scraper.run().await {
        Ok(outcome) => HttpResponse::Ok().json(ScrapeResponse {
            listings: outcome.listings,
            output: outcome.output.map(|path| path.display().to_string()),
        }),
        Err(e @ (ScraperError::RequestError(_) | ScraperError::Status(_))) => {
            tracing::error!("Scrape fetch failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, "scrape_failed", e.to_string())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "scrape_failed", e.to_string())
        }
    }
}

/// GET /api/scraped
///
/// Rows of the last scrape output.
async fn get_scraped(state: web::Data<AppState>) -> impl Responder {
    let path = state.scraper.output_path();

    if !path.exists() {
        return error_response(
            StatusCode::NOT_FOUND,
            "no_data",
            "no scraped data yet, run POST /api/scrape first",
        );
    }

    match web::block(move || read_csv(&path)).await {
        Ok(Ok(listings)) => HttpResponse::Ok().json(listings),
        Ok(Err(e)) => {
            tracing::error!("Failed to read scraped data: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "read_failed", e.to_string())
        }
        Err(e) => {
            tracing::error!("Blocking read was cancelled: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "read_failed", e.to_string())
        }
    }
}
