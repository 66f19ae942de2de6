//! HTTP route entry point for `/api/...`.
//!
//! - `/health`, `/healthz` → liveness plus database ping (public)
//! - `/auth`               → login, registration, profile, password recovery
//! - `/tickets`            → ticket engine, comments, dashboard figures (authenticated)
//! - `/notifications`      → caller's inbox (authenticated)
//! - `/reports`            → service feedback (authenticated)

use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    auth::auth_routes, health::health_routes, notifications::notification_routes,
    reports::report_routes, tickets::ticket_routes,
};

pub mod auth;
pub mod health;
pub mod notifications;
pub mod reports;
pub mod tickets;

/// Builds the router mounted under `/api`, with state applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .route("/healthz", get(health::health_check))
        .nest("/auth", auth_routes())
        .nest(
            "/tickets",
            ticket_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/notifications",
            notification_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/reports",
            report_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
