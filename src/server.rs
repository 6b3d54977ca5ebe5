//! Main server module - Axum setup and router configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::db::Database;
use crate::routes;
use crate::state::AppState;

/// Server command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "cafe-api", version, about = "REST API for a cafe directory")]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3030")]
    pub port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Database file path
    #[arg(long, default_value = "cafes.db")]
    pub db_path: PathBuf,

    /// Secret required by the report-closed endpoint
    #[arg(long, env = "CAFE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

/// Run the server with the given arguments
pub async fn run_server(args: ServerArgs) -> anyhow::Result<()> {
    info!("Opening database at {}", args.db_path.display());
    let db = Database::open(&args.db_path)?;

    let state = AppState::new(db, args.api_key);
    let app = create_router(state, args.timeout);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;

    info!("Starting cafe-api on http://{}", addr);
    info!("Database: {}", args.db_path.display());

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the Axum router with all routes
pub fn create_router(state: AppState, timeout_secs: u64) -> Router {
    // CORS layer for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Middleware stack
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
        .layer(cors);

    Router::new()
        .route("/", get(routes::home))
        .route("/health", get(routes::health_check))
        // Reads
        .route("/random", get(routes::random_cafe))
        .route("/all", get(routes::all_cafes))
        .route("/search", get(routes::search_cafes))
        // Mutations; update and delete also accept GET for legacy clients
        .route("/add", post(routes::add_cafe))
        .route(
            "/update-price/{id}",
            put(routes::update_price).get(routes::update_price),
        )
        .route(
            "/report-closed/{id}",
            delete(routes::report_closed).get(routes::report_closed),
        )
        .with_state(state)
        .layer(middleware)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
