use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;
pub mod post;

/// `/tickets/{ticket_id}/comments`
///
/// - `GET`  → comments oldest first
/// - `POST` → add a comment; notifies the creator and assignee
pub fn comment_routes() -> Router<AppState> {
    Router::new().route("/", get(get::list_comments).post(post::create_comment))
}
