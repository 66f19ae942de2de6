use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use chrono::Utc;
use serde::Serialize;
use util::{config::AppConfig, state::AppState};

use crate::response::ApiResponse;

/// Builds the `/health` route group.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize, Default)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    pub timestamp: String,
    pub environment: String,
    pub version: String,
}

/// GET /health (also served at /healthz)
///
/// Pings the database.
///
/// ### Responses
/// - `200 OK` with `status: "ok"`, `database: "connected"`
/// - `500 Internal Server Error` with `status: "error"`, `database: "disconnected"`
pub async fn health_check(State(app_state): State<AppState>) -> impl IntoResponse {
    let (environment, version) = {
        let config = AppConfig::global();
        (config.env.clone(), config.version.clone())
    };
    let timestamp = Utc::now().to_rfc3339();

    match app_state.db().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                HealthReport {
                    status: "ok",
                    database: "connected",
                    timestamp,
                    environment,
                    version,
                },
                "Health check passed",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse {
                    success: false,
                    data: HealthReport {
                        status: "error",
                        database: "disconnected",
                        timestamp,
                        environment,
                        version,
                    },
                    message: "Database connection failed".into(),
                }),
            )
        }
    }
}
