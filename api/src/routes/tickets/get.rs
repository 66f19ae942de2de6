use axum::{
    Extension,
    extract::{Path, Query, State},
};
use services::{
    requests::TicketListQuery,
    views::{HistoryView, TicketPage, TicketView},
};
use util::state::AppState;

use super::common::ticket_service;
use crate::{
    auth::AuthUser,
    response::{ApiResult, ok},
};

/// GET /tickets
///
/// ### Query Parameters
/// - `status`, `priority`: exact match
/// - `category`: exact match
/// - `search`: case-insensitive substring of title or description
/// - `page` (default 1), `limit` (default 10, max 100)
///
/// Ordered by most recently updated first.
///
/// ### Responses
/// - `200 OK` with `{ tickets, pagination: { total, page, limit, totalPages } }`
/// - `400 Bad Request` on an unknown status or priority
pub async fn list_tickets(
    State(app_state): State<AppState>,
    Query(query): Query<TicketListQuery>,
) -> ApiResult<TicketPage> {
    let (filter, pagination) = query.into_parts()?;
    let page = ticket_service(&app_state)
        .list_tickets(&filter, pagination)
        .await?;
    ok(page, "Tickets retrieved successfully")
}

/// GET /tickets/my
pub async fn my_tickets(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<TicketView>> {
    let tickets = ticket_service(&app_state).my_tickets(&user.actor()).await?;
    ok(tickets, "Tickets retrieved successfully")
}

/// GET /tickets/{ticket_id}
///
/// ### Responses
/// - `200 OK` with the ticket, its comments (oldest first) and history (newest first)
/// - `404 Not Found`
pub async fn get_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> ApiResult<TicketView> {
    let ticket = ticket_service(&app_state).get_ticket(ticket_id).await?;
    ok(ticket, "Ticket retrieved successfully")
}

/// GET /tickets/{ticket_id}/history
///
/// ### Responses
/// - `200 OK` with history entries newest first
/// - `404 Not Found` when the ticket does not exist
pub async fn get_history(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> ApiResult<Vec<HistoryView>> {
    let history = ticket_service(&app_state).list_history(ticket_id).await?;
    ok(history, "Ticket history retrieved successfully")
}
