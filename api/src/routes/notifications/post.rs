use axum::{Extension, Json, extract::State};
use serde::Serialize;
use services::{
    notification_service::NotificationService, requests::MarkReadRequest,
    views::NotificationView,
};
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiResult, ok},
};

/// POST /notifications/read
///
/// ### Responses
/// - `200 OK` with the updated notification
/// - `404 Not Found` when the notification does not exist or belongs to someone else
pub async fn mark_read(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<MarkReadRequest>,
) -> ApiResult<NotificationView> {
    let notification = NotificationService::mark_read(app_state.db(), req.id, claims.sub).await?;
    ok(notification, "Notification marked as read")
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

/// POST /notifications/read-all
///
/// `updated` is the number of notifications that were unread. Calling it
/// again returns 0.
pub async fn mark_all_read(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> ApiResult<MarkAllReadResponse> {
    let updated = NotificationService::mark_all_read(app_state.db(), claims.sub).await?;
    ok(
        MarkAllReadResponse { updated },
        "All notifications marked as read",
    )
}
