use axum::{Extension, Json, extract::State};
use services::{
    feedback_service::FeedbackService,
    requests::{CreateReport, CreateReportRequest},
    views::ReportView,
};
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiResult, created},
};

/// POST /reports
///
/// ### Request Body
/// ```json
/// { "title": "Slow dashboard", "description": "Takes 10s to load", "type": "performance" }
/// ```
/// `type` is one of `performance`, `issue`, `suggestion`.
///
/// ### Responses
/// - `201 Created` with the report (status `pending`)
/// - `400 Bad Request`
pub async fn create_report(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateReportRequest>,
) -> ApiResult<ReportView> {
    let input = CreateReport::try_from(req)?;
    let report = FeedbackService::create_report(app_state.db(), &user.actor(), input).await?;
    created(report, "Report created successfully")
}
