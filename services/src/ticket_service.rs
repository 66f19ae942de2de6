//! Ticket lifecycle engine.
//!
//! Every mutation runs inside one [`UnitOfWork`]: the ticket row is re-read,
//! authorization and transition rules are checked against what is actually
//! stored, then the change, its history entries and any notifications are
//! written together or not at all.

use db::UnitOfWork;
use db::models::{
    comments,
    tickets::{self, TicketFilter, TicketPatch, TicketStatus},
    user,
};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::info;

use crate::actor::Actor;
use crate::error::ServiceError;
use crate::history_service::{self as history, HistoryService};
use crate::notification_service::{self as notices, NotificationService};
use crate::requests::{CreateComment, CreateTicket, Pagination, UpdateTicket};
use crate::transition::TransitionPolicy;
use crate::views::{
    CommentView, HistoryView, PaginationMeta, TicketPage, TicketView, UserSummary,
    load_user_summaries,
};

fn ticket_not_found() -> ServiceError {
    ServiceError::not_found("Ticket not found")
}

fn unknown_actor() -> ServiceError {
    ServiceError::Unauthorized("User no longer exists".into())
}

#[derive(Clone)]
pub struct TicketService {
    db: DatabaseConnection,
    policy: TransitionPolicy,
}

impl TicketService {
    pub fn new(db: DatabaseConnection, policy: TransitionPolicy) -> Self {
        Self { db, policy }
    }

    /// Uses the transition policy selected by `STRICT_STATUS_TRANSITIONS`.
    pub fn from_config(db: DatabaseConnection) -> Self {
        Self::new(db, TransitionPolicy::from_config())
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub async fn create_ticket(
        &self,
        actor: &Actor,
        input: CreateTicket,
    ) -> Result<TicketView, ServiceError> {
        if !actor.can_file_tickets() {
            return Err(ServiceError::forbidden("Technicians cannot create tickets"));
        }

        let uow = UnitOfWork::begin(&self.db, "create_ticket").await?;

        let creator = user::Model::find_by_id(uow.conn(), actor.user_id)
            .await?
            .ok_or_else(unknown_actor)?;

        let ticket = tickets::Model::create(
            uow.conn(),
            actor.user_id,
            &input.title,
            &input.description,
            &input.category,
            input.priority,
        )
        .await?;

        HistoryService::record(uow.conn(), ticket.id, actor.user_id, history::TICKET_CREATED)
            .await?;

        uow.commit().await?;

        info!(ticket_id = ticket.id, creator_id = actor.user_id, "Ticket created");

        let mut view = TicketView::new(ticket, &Default::default());
        view.creator = Some(UserSummary::from(&creator));
        Ok(view)
    }

    pub async fn update_ticket(
        &self,
        actor: &Actor,
        ticket_id: i64,
        input: UpdateTicket,
    ) -> Result<TicketView, ServiceError> {
        let uow = UnitOfWork::begin(&self.db, "update_ticket").await?;

        let current = tickets::Model::find_by_id(uow.conn(), ticket_id)
            .await?
            .ok_or_else(ticket_not_found)?;

        // Values equal to what the ticket already holds are not changes.
        let changes = UpdateTicket {
            status: input.status.filter(|s| *s != current.status),
            priority: input.priority.filter(|p| *p != current.priority),
            assignee_id: input.assignee_id.filter(|id| Some(*id) != current.assignee_id),
        };
        authorize_update(actor, &current, &changes)?;

        let mut patch = TicketPatch::default();
        let mut actions = Vec::new();

        if let Some(status) = changes.status {
            self.policy.check(current.status, status)?;
            patch.status = Some(status);
            actions.push(history::status_changed(status));
        }

        if let Some(priority) = changes.priority {
            patch.priority = Some(priority);
            actions.push(history::priority_changed(priority));
        }

        let new_assignee = match changes.assignee_id {
            Some(assignee_id) => {
                let assignee = user::Model::find_by_id(uow.conn(), assignee_id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::validation(format!("Assignee {assignee_id} does not exist"))
                    })?;
                if !assignee.role.is_staff() {
                    return Err(ServiceError::validation(
                        "Tickets can only be assigned to technicians or admins",
                    ));
                }
                patch.assignee_id = Some(assignee.id);
                actions.push(history::assigned_to(&assignee));
                Some(assignee)
            }
            None => None,
        };

        let ticket = if patch.is_empty() {
            current
        } else {
            current.apply_patch(uow.conn(), &patch).await?
        };

        for action in &actions {
            HistoryService::record(uow.conn(), ticket.id, actor.user_id, action).await?;
        }

        if let Some(assignee) = new_assignee.as_ref().filter(|a| a.id != actor.user_id) {
            let notice = notices::assignment_notice(assignee.id, &ticket.title);
            NotificationService::notify(uow.conn(), &notice).await?;
        }

        let view = ticket_view(uow.conn(), ticket).await?;
        uow.commit().await?;

        if !actions.is_empty() {
            info!(
                ticket_id,
                actor_id = actor.user_id,
                changes = actions.len(),
                "Ticket updated"
            );
        }

        Ok(view)
    }

    pub async fn add_comment(
        &self,
        actor: &Actor,
        ticket_id: i64,
        input: CreateComment,
    ) -> Result<CommentView, ServiceError> {
        let uow = UnitOfWork::begin(&self.db, "add_comment").await?;

        let ticket = tickets::Model::find_by_id(uow.conn(), ticket_id)
            .await?
            .ok_or_else(ticket_not_found)?;
        let author = user::Model::find_by_id(uow.conn(), actor.user_id)
            .await?
            .ok_or_else(unknown_actor)?;

        let comment =
            comments::Model::create(uow.conn(), ticket.id, actor.user_id, &input.content).await?;

        HistoryService::record(uow.conn(), ticket.id, actor.user_id, history::COMMENT_ADDED)
            .await?;

        for notice in notices::comment_notices(&ticket, actor.user_id) {
            NotificationService::notify(uow.conn(), &notice).await?;
        }

        ticket.touch(uow.conn()).await?;
        uow.commit().await?;

        info!(ticket_id, comment_id = comment.id, author_id = actor.user_id, "Comment added");

        Ok(CommentView::new(comment, Some(UserSummary::from(&author))))
    }

    pub async fn list_tickets(
        &self,
        filter: &TicketFilter,
        pagination: Pagination,
    ) -> Result<TicketPage, ServiceError> {
        let (items, total) =
            tickets::Model::find_many(&self.db, filter, pagination.page, pagination.limit).await?;
        let tickets = ticket_views(&self.db, items).await?;

        Ok(TicketPage {
            tickets,
            pagination: PaginationMeta::new(total, pagination.page, pagination.limit),
        })
    }

    /// The ticket with its conversation and audit trail.
    pub async fn get_ticket(&self, ticket_id: i64) -> Result<TicketView, ServiceError> {
        let ticket = tickets::Model::find_by_id(&self.db, ticket_id)
            .await?
            .ok_or_else(ticket_not_found)?;

        let comments = self.comment_views(ticket.id).await?;
        let history = HistoryService::list_for_ticket(&self.db, ticket.id).await?;

        let mut view = ticket_view(&self.db, ticket).await?;
        view.comments = Some(comments);
        view.history = Some(history);
        Ok(view)
    }

    pub async fn list_comments(&self, ticket_id: i64) -> Result<Vec<CommentView>, ServiceError> {
        if tickets::Model::find_by_id(&self.db, ticket_id).await?.is_none() {
            return Err(ticket_not_found());
        }
        self.comment_views(ticket_id).await
    }

    pub async fn list_history(&self, ticket_id: i64) -> Result<Vec<HistoryView>, ServiceError> {
        HistoryService::list_for_ticket(&self.db, ticket_id).await
    }

    /// Tickets the actor filed or is working on.
    pub async fn my_tickets(&self, actor: &Actor) -> Result<Vec<TicketView>, ServiceError> {
        let items = tickets::Model::find_involving_user(&self.db, actor.user_id).await?;
        ticket_views(&self.db, items).await
    }

    async fn comment_views(&self, ticket_id: i64) -> Result<Vec<CommentView>, ServiceError> {
        let comments = comments::Model::find_all_for_ticket(&self.db, ticket_id).await?;
        let authors = load_user_summaries(&self.db, comments.iter().map(|c| c.user_id)).await?;
        Ok(comments
            .into_iter()
            .map(|c| {
                let author = authors.get(&c.user_id).cloned();
                CommentView::new(c, author)
            })
            .collect())
    }
}

/// Staff may change anything. A ticket's creator may only close it out.
fn authorize_update(
    actor: &Actor,
    ticket: &tickets::Model,
    input: &UpdateTicket,
) -> Result<(), ServiceError> {
    if actor.is_staff() {
        return Ok(());
    }

    if input.priority.is_some() || input.assignee_id.is_some() {
        return Err(ServiceError::forbidden(
            "Only technicians and admins can change priority or assignee",
        ));
    }

    if let Some(status) = input.status {
        if ticket.creator_id != actor.user_id {
            return Err(ServiceError::forbidden("You are not allowed to modify this ticket"));
        }
        if !matches!(status, TicketStatus::Resolved | TicketStatus::Closed) {
            return Err(ServiceError::forbidden(
                "Ticket creators can only mark a ticket as resolved or closed",
            ));
        }
    }

    Ok(())
}

async fn ticket_view<C: ConnectionTrait>(
    conn: &C,
    ticket: tickets::Model,
) -> Result<TicketView, ServiceError> {
    let ids = std::iter::once(ticket.creator_id).chain(ticket.assignee_id);
    let users = load_user_summaries(conn, ids).await?;
    Ok(TicketView::new(ticket, &users))
}

async fn ticket_views<C: ConnectionTrait>(
    conn: &C,
    items: Vec<tickets::Model>,
) -> Result<Vec<TicketView>, ServiceError> {
    let ids = items
        .iter()
        .flat_map(|t| std::iter::once(t.creator_id).chain(t.assignee_id));
    let users = load_user_summaries(conn, ids.collect::<Vec<_>>()).await?;
    Ok(items.into_iter().map(|t| TicketView::new(t, &users)).collect())
}
