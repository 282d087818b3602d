use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use hotel_recommender::config::{CorsSettings, LoggingSettings, Settings};
use hotel_recommender::core::Recommender;
use hotel_recommender::routes::{self, AppState, TopNLimits};
use hotel_recommender::services::{BookingScraper, CacheManager, HotelCatalog};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn build_cors(settings: &CorsSettings) -> Cors {
    if settings.allowed_origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }

    settings
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&settings.logging);

    info!("Starting Hotel Recommender API (data source: {:?})", settings.data.source);

    let (catalog, store) = match HotelCatalog::load(&settings.data).await {
        Ok((catalog, store)) => (Arc::new(catalog), store),
        Err(e) => {
            error!("Failed to load hotel catalog: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!("Catalog loaded with {} hotels", catalog.len());

    let cache = Arc::new(
        CacheManager::connect(
            settings.cache.redis_url.as_deref(),
            settings.cache.l1_cache_size,
            settings.cache.ttl_secs,
        )
        .await,
    );

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
        settings.cache.l1_cache_size,
        settings.cache.ttl_secs,
        cache.has_redis()
    );

    let scraper = match BookingScraper::new(settings.scraper.to_scraper_config()) {
        Ok(scraper) => Arc::new(scraper),
        Err(e) => {
            error!("Failed to build scraper HTTP client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let recommender = Recommender::new(
        settings.recommender.scoring_params(),
        settings.recommender.max_attempts,
    );

    info!("Recommender initialized with params: {:?}", recommender.params());

    let app_state = AppState {
        catalog,
        store: store.clone(),
        recommender,
        limits: TopNLimits {
            default_top_n: settings.recommender.default_top_n,
            max_top_n: settings.recommender.max_top_n,
        },
        cache,
        scraper,
        scrape_lock: Arc::new(tokio::sync::Mutex::new(())),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let cors_settings = settings.cors.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(build_cors(&cors_settings))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_app)
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    let result = server.bind((host, port))?.run().await;

    if let Some(store) = store {
        store.close().await;
    }

    result
}
