//! Health check route

use axum::{extract::State, Json};

use crate::models::{DatabaseHealth, HealthResponse};
use crate::state::AppState;

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_path = state.db().path().display().to_string();
    let db_size = state.db().size_bytes();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        database: DatabaseHealth {
            connected: true,
            path: db_path,
            size_bytes: db_size,
        },
    })
}
