use axum::{
    Extension,
    extract::{Path, State},
};
use services::{feedback_service::FeedbackService, views::ReportView};
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiResult, ok},
};

/// GET /reports
pub async fn list_reports(State(app_state): State<AppState>) -> ApiResult<Vec<ReportView>> {
    let reports = FeedbackService::list_reports(app_state.db()).await?;
    ok(reports, "Reports retrieved successfully")
}

/// GET /reports/my
pub async fn my_reports(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<ReportView>> {
    let reports = FeedbackService::my_reports(app_state.db(), &user.actor()).await?;
    ok(reports, "Reports retrieved successfully")
}

/// GET /reports/{report_id}
pub async fn get_report(
    State(app_state): State<AppState>,
    Path(report_id): Path<i64>,
) -> ApiResult<ReportView> {
    let report = FeedbackService::get_report(app_state.db(), report_id).await?;
    ok(report, "Report retrieved successfully")
}
