use axum::extract::{Path, State};
use services::views::CommentView;
use util::state::AppState;

use crate::{
    response::{ApiResult, ok},
    routes::tickets::common::ticket_service,
};

/// GET /tickets/{ticket_id}/comments
///
/// ### Responses
/// - `200 OK` with comments oldest first, each with its author
/// - `404 Not Found` when the ticket does not exist
pub async fn list_comments(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> ApiResult<Vec<CommentView>> {
    let comments = ticket_service(&app_state).list_comments(ticket_id).await?;
    ok(comments, "Comments retrieved successfully")
}
