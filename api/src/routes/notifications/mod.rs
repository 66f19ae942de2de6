//! `/notifications`: the caller's inbox.
//!
//! - `GET  /notifications`          → newest first
//! - `POST /notifications/read`     → mark one as read (`{ "id": 3 }`)
//! - `POST /notifications/read-all` → mark every unread one as read

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_notifications))
        .route("/read", post(post::mark_read))
        .route("/read-all", post(post::mark_all_read))
}
