//! Gift List Backend
//!
//! REST backend with SQLite persistence for tracking people and their gift ideas.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod ordering;
mod service;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::Repository;
use service::{GiftListService, LinkPolicy};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GiftListService>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting Gift List Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Static directory: {:?}", config.static_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.strict_links {
        tracing::info!("Strict link validation enabled (GIFTS_STRICT_LINKS)");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let service = GiftListService::new(
        Repository::new(pool),
        LinkPolicy::from_strict(config.strict_links),
    );

    // Create application state
    let state = AppState {
        service: Arc::new(service),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes. The static reorder paths take precedence over `{id}`.
    let api_routes = Router::new()
        // People
        .route("/people", get(api::list_people).post(api::create_person))
        .route("/people/reorder", put(api::reorder_people))
        .route(
            "/people/{id}",
            put(api::update_person).delete(api::delete_person),
        )
        // Gifts
        .route("/gifts", post(api::create_gift))
        .route("/gifts/reorder", put(api::reorder_gifts))
        .route(
            "/gifts/{id}",
            get(api::list_gifts)
                .put(api::update_gift)
                .delete(api::delete_gift),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    // Browser UI assets
    let ui = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .fallback_service(ui)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
