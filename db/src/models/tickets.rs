use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ActiveValue::Set, Condition, PaginatorTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub description: String,

    /// Lowercased copies of `title` and `description`, matched by search.
    /// SQLite's `LOWER()` leaves non-ASCII letters alone, so folding happens here.
    pub title_search: String,
    pub description_search: String,

    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: String,

    pub creator_id: i64,
    pub assignee_id: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TicketStatus {
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "assigned")]
    Assigned,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_priority")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatorId",
        to = "super::user::Column::Id"
    )]
    Creator,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AssigneeId",
        to = "super::user::Column::Id"
    )]
    Assignee,

    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,

    #[sea_orm(has_many = "super::ticket_history::Entity")]
    History,
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::ticket_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn fold_for_search(text: &str) -> String {
    text.to_lowercase()
}

/// `%term%` with `\`, `%` and `_` escaped so the term matches literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Listing filters. Every field is optional and they combine with AND.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<String>,
    /// Case-insensitive substring over title and description.
    pub search: Option<String>,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketPatch {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assignee_id: Option<i64>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.assignee_id.is_none()
    }
}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        creator_id: i64,
        title: &str,
        description: &str,
        category: &str,
        priority: TicketPriority,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            title_search: Set(fold_for_search(title)),
            description_search: Set(fold_for_search(description)),
            status: Set(TicketStatus::New),
            priority: Set(priority),
            category: Set(category.to_owned()),
            creator_id: Set(creator_id),
            assignee_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Returns one page of tickets plus the total number of matches.
    ///
    /// `page` is 1-based. Newest activity first, ties broken by id.
    pub async fn find_many<C: ConnectionTrait>(
        db: &C,
        filter: &TicketFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Model>, u64), DbErr> {
        let mut condition = Condition::all();

        if let Some(status) = filter.status {
            condition = condition.add(Column::Status.eq(status));
        }
        if let Some(priority) = filter.priority {
            condition = condition.add(Column::Priority.eq(priority));
        }
        if let Some(category) = filter.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            condition = condition.add(Column::Category.eq(category));
        }
        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = contains_pattern(&fold_for_search(term));
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(Column::TitleSearch).like(LikeExpr::new(&pattern).escape('\\')))
                    .add(
                        Expr::col(Column::DescriptionSearch)
                            .like(LikeExpr::new(&pattern).escape('\\')),
                    ),
            );
        }

        let paginator = Entity::find()
            .filter(condition)
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .paginate(db, per_page.max(1));

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((items, total))
    }

    /// Tickets the user filed or is assigned to.
    pub async fn find_involving_user<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(
                Condition::any()
                    .add(Column::CreatorId.eq(user_id))
                    .add(Column::AssigneeId.eq(user_id)),
            )
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Writes the set fields of `patch` and bumps `updated_at`.
    pub async fn apply_patch<C: ConnectionTrait>(
        self,
        db: &C,
        patch: &TicketPatch,
    ) -> Result<Model, DbErr> {
        let mut active_model: ActiveModel = self.into();

        if let Some(status) = patch.status {
            active_model.status = Set(status);
        }
        if let Some(priority) = patch.priority {
            active_model.priority = Set(priority);
        }
        if let Some(assignee_id) = patch.assignee_id {
            active_model.assignee_id = Set(Some(assignee_id));
        }
        active_model.updated_at = Set(Utc::now());

        active_model.update(db).await
    }

    pub async fn touch<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        let mut active_model: ActiveModel = self.into();
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }
}
