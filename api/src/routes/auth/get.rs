use axum::{Extension, extract::State};
use services::{user_service::UserService, views::UserView};
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiResult, ok},
};

/// GET /auth/me
///
/// Profile of the authenticated user.
///
/// ### Responses
/// - `200 OK` with the user (no password hash)
/// - `401 Unauthorized`
/// - `404 Not Found` when the account no longer exists
pub async fn get_me(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> ApiResult<UserView> {
    let user = UserService::profile(app_state.db(), claims.sub).await?;
    ok(user, "User retrieved successfully")
}
