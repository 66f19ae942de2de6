use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, PaginatorTrait, QueryOrder, entity::prelude::*};

/// Append-only audit entry for a ticket.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ticket_id: i64,
    /// The actor who caused the entry.
    pub user_id: i64,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tickets::Entity",
        from = "Column::TicketId",
        to = "super::tickets::Column::Id"
    )]
    Ticket,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        ticket_id: i64,
        user_id: i64,
        action: &str,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            ticket_id: Set(ticket_id),
            user_id: Set(user_id),
            action: Set(action.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Newest first.
    pub async fn find_all_for_ticket<C: ConnectionTrait>(
        db: &C,
        ticket_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TicketId.eq(ticket_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn count_for_ticket<C: ConnectionTrait>(db: &C, ticket_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::TicketId.eq(ticket_id))
            .count(db)
            .await
    }
}
