use axum::{Extension, extract::State};
use services::{notification_service::NotificationService, views::NotificationView};
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiResult, ok},
};

/// GET /notifications
pub async fn list_notifications(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> ApiResult<Vec<NotificationView>> {
    let notifications = NotificationService::list_for_user(app_state.db(), claims.sub).await?;
    ok(notifications, "Notifications retrieved successfully")
}
