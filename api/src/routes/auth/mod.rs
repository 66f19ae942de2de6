//! `/auth` route group: credentials, profile and password recovery.
//!
//! Public:
//! - `POST /auth/login`
//! - `POST /auth/register`
//! - `POST /auth/forgot-password`
//! - `POST /auth/reset-password`
//! - `POST /auth/verify-recaptcha`
//!
//! Authenticated:
//! - `GET   /auth/me`
//! - `PATCH /auth/theme`

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, patch, post},
};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub mod get;
pub mod patch;
pub mod post;

pub fn auth_routes() -> Router<AppState> {
    let authenticated = Router::new()
        .route("/me", get(get::get_me))
        .route("/theme", patch(patch::update_theme))
        .route_layer(from_fn(allow_authenticated));

    Router::new()
        .route("/login", post(post::login))
        .route("/register", post(post::register))
        .route("/forgot-password", post(post::forgot_password))
        .route("/reset-password", post(post::reset_password))
        .route("/verify-recaptcha", post(post::verify_recaptcha))
        .merge(authenticated)
}
