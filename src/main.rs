use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use phonly::config::{AppConfig, StoreBackend};
use phonly::db::{self, MemoryStore, SqliteStore, Store};
use phonly::handlers;
use phonly::services::bookings::BookingService;
use phonly::services::messaging::whatsapp::WhatsAppProvider;
use phonly::services::messaging::{DisabledProvider, MessagingProvider};
use phonly::services::reviews::ReviewService;
use phonly::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Sqlite => {
            tracing::info!("using SQLite store ({})", config.database_url);
            Arc::new(SqliteStore::new(db::init_db(&config.database_url)?))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, data will be lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let messaging: Arc<dyn MessagingProvider> = if config.whatsapp_configured() {
        tracing::info!("WhatsApp notifications enabled");
        Arc::new(WhatsAppProvider::new(
            config.whatsapp_api_url.clone(),
            config.whatsapp_phone_number_id.clone(),
            config.whatsapp_access_token.clone(),
            config.notify_timeout(),
        )?)
    } else {
        tracing::warn!("WA_ACCESS_TOKEN or WA_PHONE_NUMBER_ID not set, notifications disabled");
        Arc::new(DisabledProvider)
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        bookings: BookingService::new(
            Arc::clone(&store),
            Arc::clone(&messaging),
            config.notify_timeout(),
        ),
        reviews: ReviewService::new(store),
        messaging,
    });

    let app = handlers::router(state)
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
