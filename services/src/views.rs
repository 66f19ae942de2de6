//! Response shapes returned by the services, serialized as camelCase JSON.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use db::models::{
    comments, notifications,
    reports::{self, ReportStatus, ReportType},
    ticket_history,
    tickets::{self, TicketPriority, TicketStatus},
    user::{self, Role, Theme},
};
use sea_orm::{ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&user::Model> for UserSummary {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// A user's own profile. The password hash never leaves the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub theme: Theme,
    pub created_at: String,
}

impl From<user::Model> for UserView {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            theme: user.theme,
            created_at: timestamp(user.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: String,
    pub creator_id: i64,
    pub assignee_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
    pub creator: Option<UserSummary>,
    pub assignee: Option<UserSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentView>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryView>>,
}

impl TicketView {
    /// Builds the view, taking creator and assignee from `users` when present.
    pub fn new(ticket: tickets::Model, users: &HashMap<i64, UserSummary>) -> Self {
        let creator = users.get(&ticket.creator_id).cloned();
        let assignee = ticket.assignee_id.and_then(|id| users.get(&id).cloned());
        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            status: ticket.status,
            priority: ticket.priority,
            category: ticket.category,
            creator_id: ticket.creator_id,
            assignee_id: ticket.assignee_id,
            created_at: timestamp(ticket.created_at),
            updated_at: timestamp(ticket.updated_at),
            creator,
            assignee,
            comments: None,
            history: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub ticket_id: i64,
    pub content: String,
    pub created_at: String,
    pub user: Option<UserSummary>,
}

impl CommentView {
    pub fn new(comment: comments::Model, author: Option<UserSummary>) -> Self {
        Self {
            id: comment.id,
            ticket_id: comment.ticket_id,
            content: comment.content,
            created_at: timestamp(comment.created_at),
            user: author,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub id: i64,
    pub ticket_id: i64,
    pub user_id: i64,
    pub action: String,
    pub created_at: String,
}

impl From<ticket_history::Model> for HistoryView {
    fn from(entry: ticket_history::Model) -> Self {
        Self {
            id: entry.id,
            ticket_id: entry.ticket_id,
            user_id: entry.user_id,
            action: entry.action,
            created_at: timestamp(entry.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub read: bool,
    pub created_at: String,
}

impl From<notifications::Model> for NotificationView {
    fn from(n: notifications::Model) -> Self {
        Self {
            id: n.id,
            title: n.title,
            description: n.description,
            read: n.read,
            created_at: timestamp(n.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub status: ReportStatus,
    pub created_at: String,
    pub updated_at: String,
    pub user: Option<UserSummary>,
}

impl ReportView {
    pub fn new(report: reports::Model, users: &HashMap<i64, UserSummary>) -> Self {
        let user = users.get(&report.user_id).cloned();
        Self {
            id: report.id,
            title: report.title,
            description: report.description,
            report_type: report.report_type,
            status: report.status,
            created_at: timestamp(report.created_at),
            updated_at: timestamp(report.updated_at),
            user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit.max(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPage {
    pub tickets: Vec<TicketView>,
    pub pagination: PaginationMeta,
}

/// Batch-loads summaries for the given user ids.
pub async fn load_user_summaries<C, I>(conn: &C, ids: I) -> Result<HashMap<i64, UserSummary>, DbErr>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = i64>,
{
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let users = user::Model::find_many_by_ids(conn, &ids).await?;
    Ok(users.iter().map(|u| (u.id, UserSummary::from(u))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(25, 2, 10).total_pages, 3);
        assert_eq!(PaginationMeta::new(20, 1, 10).total_pages, 2);
        assert_eq!(PaginationMeta::new(0, 1, 10).total_pages, 0);
    }
}
