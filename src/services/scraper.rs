use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveDate, Offset, Utc};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use crate::models::ScrapedListing;

/// Errors that can occur while scraping listings
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Search page returned status {0}")]
    Status(u16),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

const CARD_SELECTOR: &str = r#"[data-testid="property-card"]"#;
const TITLE_SELECTOR: &str = r#"[data-testid="title"]"#;
const DISCOUNTED_PRICE_SELECTOR: &str = r#"[data-testid="price-and-discounted-price"]"#;
const PRICE_SELECTOR: &str = r#"[data-testid="price"]"#;
const REVIEW_SCORE_SELECTOR: &str = r#"[data-testid="review-score"]"#;
const ADDRESS_SELECTOR: &str = r#"[data-testid="address"]"#;

pub const MISSING_VALUE: &str = "N/A";
pub const HIDDEN_PRICE: &str = "N/A (hidden price)";

const DEBUG_HTML_FILE: &str = "debug_page.html";

/// Scraper settings
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Search results URL without stay dates
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub output_dir: PathBuf,
    pub output_file: String,
    /// Also keep the fetched page next to the CSV
    pub debug_html: bool,
    /// Offset of the destination's local time, used to pick stay dates
    pub utc_offset_hours: i32,
}

/// Outcome of one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub listings: Vec<ScrapedListing>,
    /// CSV path, `None` when nothing was found and nothing written
    pub output: Option<PathBuf>,
}

/// Search results page scraper
///
/// Fetches a single results page for a one-night stay starting two days
/// from now, extracts the property cards and stores them as CSV.
pub struct BookingScraper {
    config: ScraperConfig,
    client: Client,
}

impl BookingScraper {
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn output_path(&self) -> PathBuf {
        self.config.output_dir.join(&self.config.output_file)
    }

    /// Fetch the raw HTML of a page
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        tracing::debug!("Fetching search page: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ScraperError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Scrape once and write the listings to the output CSV
    pub async fn run(&self) -> Result<ScrapeOutcome, ScraperError> {
        let (check_in, check_out) = stay_dates(Utc::now(), self.config.utc_offset_hours);
        let url = search_url(&self.config.base_url, check_in, check_out);

        tracing::info!("Scraping listings for {} -> {}", check_in, check_out);

        let html = self.fetch_page(&url).await?;
        let listings = parse_listings(&html)?;

        if listings.is_empty() {
            tracing::warn!("No listings found on {}", url);
        }

        let output_dir = self.config.output_dir.clone();
        let debug_html = self.config.debug_html.then_some(html);
        let output = (!listings.is_empty()).then(|| self.output_path());
        let csv_path = output.clone();

        // File writes stay off the async workers
        let listings = tokio::task::spawn_blocking(move || -> Result<Vec<ScrapedListing>, ScraperError> {
            if let Some(html) = debug_html {
                std::fs::create_dir_all(&output_dir)?;
                let debug_path = output_dir.join(DEBUG_HTML_FILE);
                if let Err(e) = std::fs::write(&debug_path, html) {
                    tracing::warn!("Failed to save debug HTML to {}: {}", debug_path.display(), e);
                }
            }

            if let Some(path) = &csv_path {
                write_csv(&listings, path)?;
                tracing::info!("Saved {} listings to {}", listings.len(), path.display());
            }

            Ok(listings)
        })
        .await??;

        Ok(ScrapeOutcome { listings, output })
    }
}

/// Check-in two days and check-out three days after today in local time
pub fn stay_dates(now: DateTime<Utc>, utc_offset_hours: i32) -> (NaiveDate, NaiveDate) {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix());
    let today = now.with_timezone(&offset).date_naive();

    (today + ChronoDuration::days(2), today + ChronoDuration::days(3))
}

/// Append stay dates to a search URL
pub fn search_url(base_url: &str, check_in: NaiveDate, check_out: NaiveDate) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}checkin={}&checkout={}",
        base_url,
        separator,
        check_in.format("%Y-%m-%d"),
        check_out.format("%Y-%m-%d")
    )
}

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::Selector(format!("{}: {}", css, e)))
}

fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(normalized_text)
        .filter(|text| !text.is_empty())
}

/// The numeric score inside a review badge, e.g. "8.5" or "8,5"
fn review_score(badge: ElementRef<'_>) -> Option<String> {
    badge
        .text()
        .map(str::trim)
        .find(|fragment| fragment.replace(',', ".").parse::<f64>().is_ok())
        .map(str::to_string)
}

/// Extract property cards from a search results page
///
/// Cards without a title are ads and are skipped.
pub fn parse_listings(html: &str) -> Result<Vec<ScrapedListing>, ScraperError> {
    let document = Html::parse_document(html);

    let card_selector = selector(CARD_SELECTOR)?;
    let title_selector = selector(TITLE_SELECTOR)?;
    let discounted_selector = selector(DISCOUNTED_PRICE_SELECTOR)?;
    let price_selector = selector(PRICE_SELECTOR)?;
    let score_selector = selector(REVIEW_SCORE_SELECTOR)?;
    let address_selector = selector(ADDRESS_SELECTOR)?;

    let mut listings = Vec::new();

    for card in document.select(&card_selector) {
        let Some(name) = first_text(card, &title_selector) else {
            tracing::debug!("Skipping card without a title");
            continue;
        };

        let price = first_text(card, &discounted_selector)
            .or_else(|| first_text(card, &price_selector))
            .unwrap_or_else(|| HIDDEN_PRICE.to_string());

        let score = card
            .select(&score_selector)
            .next()
            .and_then(review_score)
            .unwrap_or_else(|| MISSING_VALUE.to_string());

        let address = first_text(card, &address_selector)
            .unwrap_or_else(|| MISSING_VALUE.to_string());

        tracing::trace!("Scraped: {} | {} | {}", name, score, price);

        listings.push(ScrapedListing { name, score, price, address });
    }

    Ok(listings)
}

#[derive(Serialize)]
struct CsvRowRef<'a> {
    index: usize,
    name: &'a str,
    score: &'a str,
    price: &'a str,
    address: &'a str,
}

#[derive(Deserialize)]
struct CsvRow {
    #[allow(dead_code)]
    index: usize,
    name: String,
    score: String,
    price: String,
    address: String,
}

/// Write listings as CSV with a 1-based index column
pub fn write_csv(listings: &[ScrapedListing], path: &Path) -> Result<(), ScraperError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for (i, listing) in listings.iter().enumerate() {
        writer.serialize(CsvRowRef {
            index: i + 1,
            name: &listing.name,
            score: &listing.score,
            price: &listing.price,
            address: &listing.address,
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Read listings written by [`write_csv`]
pub fn read_csv(path: &Path) -> Result<Vec<ScrapedListing>, ScraperError> {
    let mut reader = csv::Reader::from_path(path)?;

    reader
        .deserialize::<CsvRow>()
        .map(|row| -> Result<ScrapedListing, ScraperError> {
            let row = row?;
            Ok(ScrapedListing {
                name: row.name,
                score: row.score,
                price: row.price,
                address: row.address,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FIXTURE: &str = r#"
        <html><body>
          <div data-testid="property-card">
            <div data-testid="title">Saigon  Riverside
              Hotel</div>
            <span data-testid="price-and-discounted-price">VND 1,250,000</span>
            <div data-testid="review-score"><div>Scored 8.6</div><div>8.6</div><div>Excellent</div></div>
            <span data-testid="address">District 1, Ho Chi Minh City</span>
          </div>
          <div data-testid="property-card">
            <div data-testid="sponsored">Sponsored</div>
          </div>
          <div data-testid="property-card">
            <div data-testid="title">Hidden Price Inn</div>
          </div>
          <div data-testid="property-card">
            <div data-testid="title">Plain Price Hostel</div>
            <span data-testid="price">VND 350,000</span>
            <div data-testid="review-score"><div>7,9</div></div>
          </div>
        </body></html>
    "#;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hotel-recommender-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_parse_listings() {
        let listings = parse_listings(FIXTURE).unwrap();

        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0], ScrapedListing {
            name: "Saigon Riverside Hotel".to_string(),
            score: "8.6".to_string(),
            price: "VND 1,250,000".to_string(),
            address: "District 1, Ho Chi Minh City".to_string(),
        });

        assert_eq!(listings[1].price, HIDDEN_PRICE);
        assert_eq!(listings[1].score, MISSING_VALUE);
        assert_eq!(listings[1].address, MISSING_VALUE);

        assert_eq!(listings[2].price, "VND 350,000");
        assert_eq!(listings[2].score, "7,9");
    }

    #[test]
    fn test_parse_empty_page() {
        assert!(parse_listings("<html><body></body></html>").unwrap().is_empty());
    }

    #[test]
    fn test_stay_dates_use_local_day() {
        // 20:00 UTC is already the next day at UTC+7
        let now = Utc.with_ymd_and_hms(2025, 11, 12, 20, 0, 0).unwrap();
        let (check_in, check_out) = stay_dates(now, 7);

        assert_eq!(check_in, NaiveDate::from_ymd_opt(2025, 11, 15).unwrap());
        assert_eq!(check_out, NaiveDate::from_ymd_opt(2025, 11, 16).unwrap());

        let (check_in, _) = stay_dates(now, 0);
        assert_eq!(check_in, NaiveDate::from_ymd_opt(2025, 11, 14).unwrap());
    }

    #[test]
    fn test_search_url() {
        let check_in = NaiveDate::from_ymd_opt(2025, 11, 14).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();

        assert_eq!(
            search_url("https://example.com/search?dest_id=1", check_in, check_out),
            "https://example.com/search?dest_id=1&checkin=2025-11-14&checkout=2025-11-15"
        );
        assert_eq!(
            search_url("https://example.com/search", check_in, check_out),
            "https://example.com/search?checkin=2025-11-14&checkout=2025-11-15"
        );
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = temp_dir("csv");
        let path = dir.join("nested").join("listings.csv");
        let listings = parse_listings(FIXTURE).unwrap();

        write_csv(&listings, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("index,name,score,price,address"));
        assert_eq!(read_csv(&path).unwrap(), listings);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_run_writes_csv() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/searchresults.html")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(FIXTURE)
            .create_async()
            .await;

        let dir = temp_dir("run");
        let scraper = BookingScraper::new(ScraperConfig {
            base_url: format!("{}/searchresults.html?dest_id=-3730078", server.url()),
            user_agent: "test-agent".to_string(),
            timeout_secs: 5,
            output_dir: dir.clone(),
            output_file: "listings.csv".to_string(),
            debug_html: true,
            utc_offset_hours: 7,
        })
        .unwrap();

        let outcome = scraper.run().await.unwrap();

        mock.assert_async().await;
        assert_eq!(outcome.listings.len(), 3);
        assert_eq!(outcome.output.as_deref(), Some(dir.join("listings.csv").as_path()));
        assert!(dir.join(DEBUG_HTML_FILE).exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_run_reports_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/searchresults.html")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let scraper = BookingScraper::new(ScraperConfig {
            base_url: format!("{}/searchresults.html", server.url()),
            user_agent: "test-agent".to_string(),
            timeout_secs: 5,
            output_dir: temp_dir("status"),
            output_file: "listings.csv".to_string(),
            debug_html: false,
            utc_offset_hours: 7,
        })
        .unwrap();

        assert!(matches!(scraper.run().await, Err(ScraperError::Status(503))));
    }

    #[tokio::test]
    async fn test_run_empty_page_keeps_debug_html_only() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/searchresults.html")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html><body>No properties found</body></html>")
            .create_async()
            .await;

        let dir = temp_dir("empty-run");
        let scraper = BookingScraper::new(ScraperConfig {
            base_url: format!("{}/searchresults.html", server.url()),
            user_agent: "test-agent".to_string(),
            timeout_secs: 5,
            output_dir: dir.clone(),
            output_file: "listings.csv".to_string(),
            debug_html: true,
            utc_offset_hours: 7,
        })
        .unwrap();

        let outcome = scraper.run().await.unwrap();

        assert!(outcome.listings.is_empty());
        assert!(outcome.output.is_none());
        assert!(dir.join(DEBUG_HTML_FILE).exists());
        assert!(!scraper.output_path().exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
