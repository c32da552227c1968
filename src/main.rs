use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use smartseek::config::{Settings, StoreBackend};
use smartseek::core::NearbyFinder;
use smartseek::routes::{self, tools::AppState};
use smartseek::services::{
    CacheManager, InMemoryUserStore, PostgresUserStore, ProfileSearchProvider, SerpApiClient,
    UserStore,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: String,
    #[serde(skip)]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        success: false,
        error: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        success: false,
        error: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting SmartSeek lookup service...");

    // Initialize user store
    let store: Arc<dyn UserStore> = match settings.store.backend {
        StoreBackend::Postgres => {
            let postgres = PostgresUserStore::from_settings(
                &settings.store.url,
                settings.store.max_connections,
                settings.store.min_connections,
                settings.store.acquire_timeout_secs,
            )
            .await
            .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?;
            info!("PostgreSQL user store initialized");
            Arc::new(postgres)
        }
        StoreBackend::Memory => {
            warn!("Using in-memory user store; data is not persisted");
            Arc::new(InMemoryUserStore::new())
        }
    };

    // Initialize profile search client
    let search: Arc<dyn ProfileSearchProvider> = Arc::new(
        SerpApiClient::new(
            settings.search.endpoint.clone(),
            settings.search.api_key.clone(),
            settings.search.engine.clone(),
            settings.search.page_size,
            Duration::from_secs(settings.search.timeout_secs.unwrap_or(30)),
        )
        .map_err(|e| startup_error("Failed to initialize profile search", e))?,
    );

    // Initialize cache manager; Redis is optional
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match CacheManager::new(settings.cache.redis_url.as_deref(), l1_cache_size, cache_ttl).await {
        Ok(c) => {
            info!(
                "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
                l1_cache_size,
                cache_ttl,
                c.has_redis()
            );
            Arc::new(c)
        }
        Err(e) => {
            error!("Failed to connect to Redis ({}), running with in-process cache only", e);
            Arc::new(CacheManager::local(l1_cache_size, cache_ttl))
        }
    };

    let finder = NearbyFinder::new(settings.nearby.max_results, settings.nearby.include_bearing);

    info!("Nearby finder initialized: {:?}", finder);

    // Build application state
    let app_state = AppState {
        store,
        search,
        cache,
        finder,
        default_radius_km: settings.nearby.default_radius_km,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
