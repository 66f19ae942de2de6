use db::models::{ticket_history, tickets, user};
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::error::ServiceError;
use crate::views::HistoryView;

pub const TICKET_CREATED: &str = "Ticket created";
pub const COMMENT_ADDED: &str = "Comment added";

pub fn status_changed(status: tickets::TicketStatus) -> String {
    format!("Status changed to '{status}'")
}

pub fn priority_changed(priority: tickets::TicketPriority) -> String {
    format!("Priority changed to '{priority}'")
}

pub fn assigned_to(assignee: &user::Model) -> String {
    format!("Ticket assigned to {}", assignee.full_name())
}

/// Audit trail of ticket changes. Entries are only ever appended.
pub struct HistoryService;

impl HistoryService {
    pub async fn record<C: ConnectionTrait>(
        conn: &C,
        ticket_id: i64,
        actor_id: i64,
        action: &str,
    ) -> Result<ticket_history::Model, ServiceError> {
        if action.trim().is_empty() {
            return Err(ServiceError::validation("History action must not be empty"));
        }
        let entry = ticket_history::Model::create(conn, ticket_id, actor_id, action).await?;
        tracing::debug!(ticket_id, actor_id, action, "History recorded");
        Ok(entry)
    }

    /// Newest first. Unknown tickets are a `NotFound`.
    pub async fn list_for_ticket(
        db: &DatabaseConnection,
        ticket_id: i64,
    ) -> Result<Vec<HistoryView>, ServiceError> {
        if tickets::Model::find_by_id(db, ticket_id).await?.is_none() {
            return Err(ServiceError::not_found("Ticket not found"));
        }
        let entries = ticket_history::Model::find_all_for_ticket(db, ticket_id).await?;
        Ok(entries.into_iter().map(HistoryView::from).collect())
    }
}
