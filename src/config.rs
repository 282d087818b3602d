use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::models::ScoringParams;
use crate::services::{DataSource, ScraperConfig};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub recommender: RecommenderSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scraper: ScraperSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self { allowed_origins: default_allowed_origins() }
    }
}

fn default_allowed_origins() -> Vec<String> { vec!["http://localhost:3000".to_string()] }

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_source")]
    pub source: DataSource,
    pub json_path: Option<PathBuf>,
    pub sqlite_url: Option<String>,
    pub sqlite_max_connections: Option<u32>,
    #[serde(default = "default_mock_count")]
    pub mock_count: usize,
    #[serde(default = "default_mock_seed")]
    pub mock_seed: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            source: default_data_source(),
            json_path: None,
            sqlite_url: None,
            sqlite_max_connections: None,
            mock_count: default_mock_count(),
            mock_seed: default_mock_seed(),
        }
    }
}

fn default_data_source() -> DataSource { DataSource::Mock }
fn default_mock_count() -> usize { 120 }
fn default_mock_seed() -> u64 { 42 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderSettings {
    #[serde(default = "default_lambda")]
    pub lambda: f64,
    #[serde(default = "default_tau")]
    pub tau_low: f64,
    #[serde(default = "default_tau")]
    pub tau_high: f64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_top_n")]
    pub default_top_n: u32,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: u32,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            lambda: default_lambda(),
            tau_low: default_tau(),
            tau_high: default_tau(),
            max_attempts: default_max_attempts(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

impl RecommenderSettings {
    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            lambda: self.lambda,
            tau_low: self.tau_low,
            tau_high: self.tau_high,
        }
    }
}

fn default_lambda() -> f64 { 0.25 }
fn default_tau() -> f64 { 200_000.0 }
fn default_max_attempts() -> u32 { 2 }
fn default_top_n() -> u32 { 5 }
fn default_max_top_n() -> u32 { 20 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: Option<String>,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_l1_cache_size")]
    pub l1_cache_size: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            redis_url: None,
            ttl_secs: default_cache_ttl(),
            l1_cache_size: default_l1_cache_size(),
        }
    }
}

fn default_cache_ttl() -> u64 { 300 }
fn default_l1_cache_size() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    #[serde(default = "default_scraper_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_scraper_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default)]
    pub debug_html: bool,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: default_scraper_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_scraper_timeout(),
            output_dir: default_output_dir(),
            output_file: default_output_file(),
            debug_html: false,
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl ScraperSettings {
    pub fn to_scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout_secs: self.timeout_secs,
            output_dir: self.output_dir.clone(),
            output_file: self.output_file.clone(),
            debug_html: self.debug_html,
            utc_offset_hours: self.utc_offset_hours,
        }
    }
}

fn default_scraper_base_url() -> String {
    "https://www.booking.com/searchresults.html?dest_id=-3730078&dest_type=city&group_adults=2&req_adults=2&no_rooms=1&group_children=0&req_children=0".to_string()
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.4896.88 Safari/537.36".to_string()
}
fn default_scraper_timeout() -> u64 { 30 }
fn default_output_dir() -> PathBuf { PathBuf::from("data/raw") }
fn default_output_file() -> String { "booking_com.csv".to_string() }
fn default_utc_offset_hours() -> i32 { 7 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOTEL)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOTEL__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("HOTEL")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_recommender_settings() {
        let settings = RecommenderSettings::default();
        assert_eq!(settings.scoring_params(), ScoringParams::default());
        assert_eq!(settings.max_attempts, 2);
        assert_eq!(settings.default_top_n, 5);
        assert_eq!(settings.max_top_n, 20);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("hotel-recommender-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
                [server]
                port = 9090

                [data]
                source = "json"
                json_path = "data/hotels.json"

                [recommender]
                lambda = 0.5
            "#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.data.source, DataSource::Json);
        assert_eq!(settings.data.json_path, Some(PathBuf::from("data/hotels.json")));
        assert_eq!(settings.recommender.lambda, 0.5);
        assert_eq!(settings.recommender.tau_high, 200_000.0);
        assert_eq!(settings.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(settings.scraper.output_file, "booking_com.csv");
    }
}
