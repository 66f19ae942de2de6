use axum::{
    Extension, Json,
    extract::{Path, State},
};
use services::{
    requests::{UpdateTicket, UpdateTicketRequest},
    views::TicketView,
};
use util::state::AppState;

use super::common::ticket_service;
use crate::{
    auth::AuthUser,
    response::{ApiResult, ok},
};

/// PATCH /tickets/{ticket_id} (also PUT)
///
/// ### Request Body
/// ```json
/// { "status": "in_progress", "priority": "high", "assigneeId": 7 }
/// ```
/// Every field is optional. Each field that actually changes writes one
/// history entry; a new assignee is notified unless they assigned themselves.
///
/// ### Permissions
/// - Technicians and admins may change anything.
/// - The creator may only move the ticket to `resolved` or `closed`.
/// - Values equal to the ticket's current ones are ignored before these checks.
///
/// ### Responses
/// - `200 OK` with the updated ticket
/// - `400 Bad Request` on an unknown value, a non-staff assignee, or a
///   transition rejected in strict mode
/// - `403 Forbidden`
/// - `404 Not Found`
pub async fn update_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateTicketRequest>,
) -> ApiResult<TicketView> {
    let input = UpdateTicket::try_from(req)?;
    let ticket = ticket_service(&app_state)
        .update_ticket(&user.actor(), ticket_id, input)
        .await?;
    ok(ticket, "Ticket updated successfully")
}
