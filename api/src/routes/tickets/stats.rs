use axum::extract::State;
use services::report_service::{CategoryCount, MonthlyTotal, ReportService, TicketStats};
use util::state::AppState;

use crate::response::{ApiResult, ok};

/// GET /tickets/stats
///
/// `{ total, open, inProgress, resolved, percentChange }`, where
/// `percentChange` compares tickets created in the last month with the month
/// before.
pub async fn get_stats(State(app_state): State<AppState>) -> ApiResult<TicketStats> {
    let stats = ReportService::stats(app_state.db()).await?;
    ok(stats, "Ticket statistics retrieved successfully")
}

/// GET /tickets/categories
pub async fn get_categories(State(app_state): State<AppState>) -> ApiResult<Vec<CategoryCount>> {
    let categories = ReportService::categories(app_state.db()).await?;
    ok(categories, "Ticket categories retrieved successfully")
}

/// GET /tickets/trends
///
/// Six entries, oldest month first, e.g. `{ "name": "Jan", "total": 4 }`.
pub async fn get_trends(State(app_state): State<AppState>) -> ApiResult<Vec<MonthlyTotal>> {
    let trends = ReportService::trends(app_state.db()).await?;
    ok(trends, "Ticket trends retrieved successfully")
}
