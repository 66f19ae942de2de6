use db::models::{notifications, tickets};
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::error::ServiceError;
use crate::views::NotificationView;

pub const TICKET_ASSIGNED_TITLE: &str = "New ticket assigned";
pub const COMMENT_ON_OWN_TICKET_TITLE: &str = "New comment on your ticket";
pub const COMMENT_ON_ASSIGNED_TICKET_TITLE: &str = "New comment on assigned ticket";

/// A notification that still has to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub user_id: i64,
    pub title: &'static str,
    pub description: String,
}

pub fn assignment_notice(assignee_id: i64, ticket_title: &str) -> Notice {
    Notice {
        user_id: assignee_id,
        title: TICKET_ASSIGNED_TITLE,
        description: format!("You have been assigned to ticket: \"{ticket_title}\""),
    }
}

/// Who hears about a new comment: the creator and the assignee, never the
/// commenter, and nobody twice.
pub fn comment_notices(ticket: &tickets::Model, actor_id: i64) -> Vec<Notice> {
    let mut notices = Vec::with_capacity(2);

    if ticket.creator_id != actor_id {
        notices.push(Notice {
            user_id: ticket.creator_id,
            title: COMMENT_ON_OWN_TICKET_TITLE,
            description: format!(
                "A new comment has been added to your ticket: \"{}\"",
                ticket.title
            ),
        });
    }

    if let Some(assignee_id) = ticket.assignee_id {
        if assignee_id != actor_id && assignee_id != ticket.creator_id {
            notices.push(Notice {
                user_id: assignee_id,
                title: COMMENT_ON_ASSIGNED_TICKET_TITLE,
                description: format!("A new comment has been added to ticket: \"{}\"", ticket.title),
            });
        }
    }

    notices
}

pub struct NotificationService;

impl NotificationService {
    /// Appends one notification. Calling twice writes two rows.
    pub async fn notify<C: ConnectionTrait>(
        conn: &C,
        notice: &Notice,
    ) -> Result<notifications::Model, ServiceError> {
        let created =
            notifications::Model::create(conn, notice.user_id, notice.title, &notice.description)
                .await?;
        tracing::info!(user_id = notice.user_id, title = notice.title, "Notification created");
        Ok(created)
    }

    pub async fn list_for_user(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Vec<NotificationView>, ServiceError> {
        let items = notifications::Model::find_for_user(db, user_id).await?;
        Ok(items.into_iter().map(NotificationView::from).collect())
    }

    /// Marks one of the caller's notifications as read. Someone else's
    /// notification is indistinguishable from a missing one.
    pub async fn mark_read(
        db: &DatabaseConnection,
        notification_id: i64,
        user_id: i64,
    ) -> Result<NotificationView, ServiceError> {
        let notification = notifications::Model::find_owned(db, notification_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Notification not found"))?;
        let updated = notification.mark_read(db).await?;
        Ok(updated.into())
    }

    /// Returns the number of notifications that changed.
    pub async fn mark_all_read(db: &DatabaseConnection, user_id: i64) -> Result<u64, ServiceError> {
        let updated = notifications::Model::mark_all_read(db, user_id).await?;
        tracing::info!(user_id, updated, "Marked notifications as read");
        Ok(updated)
    }
}
