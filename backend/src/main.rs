//! AgriFund Weather Advisory Service - Backend Server
//!
//! Evaluates scheduled agricultural tasks against weather forecasts and
//! produces advisory alerts (postpone, cancel, warning, urgent) for the
//! crowdfunding platform's project dashboards.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agf_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting AgriFund Weather Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
    };

    // Periodic evaluation loop
    if config.advisory.auto_evaluate {
        spawn_advisory_loop(state.clone());
    }

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Spawn the background evaluation loop
fn spawn_advisory_loop(state: AppState) {
    let interval_minutes = state.config.advisory.interval_minutes;
    tracing::info!(
        "Automatic advisory evaluation every {} minutes",
        interval_minutes
    );

    tokio::spawn(async move {
        let client = external::forecast::ForecastClient::new(
            state.config.forecast.api_endpoint.clone(),
            state.config.forecast.horizon_hours,
        );
        let service = services::advisory::AdvisoryService::new(
            state.db.clone(),
            client,
            &state.config.advisory,
            state.config.forecast.horizon_hours,
        );

        let mut interval = tokio::time::interval(Duration::from_secs(interval_minutes * 60));
        loop {
            interval.tick().await;
            if let Err(err) = service.run_cycle().await {
                tracing::error!("Advisory cycle failed: {}", err);
            }
        }
    });
}

/// Root endpoint
async fn root() -> &'static str {
    "AgriFund Weather Advisory Service API v1.0"
}
