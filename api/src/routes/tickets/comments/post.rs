use axum::{
    Extension, Json,
    extract::{Path, State},
};
use services::{
    requests::{CreateComment, CreateCommentRequest},
    views::CommentView,
};
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiResult, created},
    routes::tickets::common::ticket_service,
};

/// POST /tickets/{ticket_id}/comments
///
/// ### Request Body
/// ```json
/// { "content": "Replaced the toner, please retry." }
/// ```
///
/// ### Responses
/// - `201 Created` with the comment and its author
/// - `400 Bad Request` on blank content
/// - `404 Not Found` when the ticket does not exist
pub async fn create_comment(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<CommentView> {
    let input = CreateComment::try_from(req)?;
    let comment = ticket_service(&app_state)
        .add_comment(&user.actor(), ticket_id, input)
        .await?;
    created(comment, "Comment added successfully")
}
