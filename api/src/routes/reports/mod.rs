//! `/reports`: feedback about the service itself (performance, issues,
//! suggestions). Anyone signed in may file one; admins review them.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;
pub mod patch;
pub mod post;

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_reports).post(post::create_report))
        .route("/my", get(get::my_reports))
        .route("/{report_id}", get(get::get_report).patch(patch::update_report))
}
