use axum::{Extension, Json, extract::State};
use services::{
    requests::{CreateTicket, CreateTicketRequest},
    views::TicketView,
};
use util::state::AppState;

use super::common::ticket_service;
use crate::{
    auth::AuthUser,
    response::{ApiResult, created},
};

/// POST /tickets
///
/// ### Request Body
/// ```json
/// {
///   "title": "Printer down",
///   "description": "Room 3 printer jams on every job",
///   "category": "Hardware",
///   "priority": "high"
/// }
/// ```
/// `priority` is optional and defaults to `medium`.
///
/// ### Responses
/// - `201 Created` with the ticket (status `new`, no assignee)
/// - `400 Bad Request` on a blank title, description or category, or an unknown priority
/// - `403 Forbidden` when the caller is a technician
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateTicketRequest>,
) -> ApiResult<TicketView> {
    let input = CreateTicket::try_from(req)?;
    let ticket = ticket_service(&app_state)
        .create_ticket(&user.actor(), input)
        .await?;
    created(ticket, "Ticket created successfully")
}
