use axum::{Extension, Json, extract::State};
use db::models::user::Theme;
use services::{requests::ThemeRequest, user_service::UserService, views::UserView};
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiResult, ok},
};

/// PATCH /auth/theme
///
/// ### Request Body
/// ```json
/// { "theme": "dark" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated user
/// - `400 Bad Request` when the theme is not `light` or `dark`
pub async fn update_theme(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ThemeRequest>,
) -> ApiResult<UserView> {
    let theme = Theme::try_from(req)?;
    let user = UserService::update_theme(app_state.db(), claims.sub, theme).await?;
    ok(user, "Theme updated successfully")
}
