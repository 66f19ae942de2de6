//! `/tickets` route group. Every route requires authentication; role checks
//! live in the ticket engine.
//!
//! - `POST  /tickets`               → create a ticket
//! - `GET   /tickets`               → filtered, paginated list
//! - `GET   /tickets/my`            → tickets the caller filed or is assigned to
//! - `GET   /tickets/stats`         → dashboard counters
//! - `GET   /tickets/categories`    → totals per category
//! - `GET   /tickets/trends`        → totals for the last six months
//! - `GET   /tickets/{ticket_id}`   → one ticket with comments and history
//! - `PATCH /tickets/{ticket_id}`   → status / priority / assignee (PUT is an alias)
//! - `GET   /tickets/{ticket_id}/history` → history entries, newest first
//! - `/tickets/{ticket_id}/comments` → see [`comments`]

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod comments;
pub mod common;
pub mod get;
pub mod patch;
pub mod post;
pub mod stats;

pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(post::create_ticket).get(get::list_tickets))
        .route("/my", get(get::my_tickets))
        .route("/stats", get(stats::get_stats))
        .route("/categories", get(stats::get_categories))
        .route("/trends", get(stats::get_trends))
        .route(
            "/{ticket_id}",
            get(get::get_ticket)
                .patch(patch::update_ticket)
                .put(patch::update_ticket),
        )
        .route("/{ticket_id}/history", get(get::get_history))
        .nest("/{ticket_id}/comments", comments::comment_routes())
}
