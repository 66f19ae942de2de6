use axum::{
    Extension, Json,
    extract::{Path, State},
};
use services::{feedback_service::FeedbackService, requests::UpdateReportRequest, views::ReportView};
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiResult, ok},
};

/// PATCH /reports/{report_id}
///
/// Admin only. Body `{ "status": "in_review" }`; status is one of `pending`,
/// `in_review`, `approved`, `rejected`.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` on an unknown status
/// - `403 Forbidden` for non-admins
/// - `404 Not Found`
pub async fn update_report(
    State(app_state): State<AppState>,
    Path(report_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateReportRequest>,
) -> ApiResult<ReportView> {
    let status = req.parse_status()?;
    let report =
        FeedbackService::update_report(app_state.db(), &user.actor(), report_id, status).await?;
    ok(report, "Report updated successfully")
}
