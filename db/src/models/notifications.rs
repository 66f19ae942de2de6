use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, QueryOrder, entity::prelude::*, sea_query::Expr};

/// A message for one user. Only `read` ever changes after insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        title: &str,
        description: &str,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            user_id: Set(user_id),
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Newest first.
    pub async fn find_for_user<C: ConnectionTrait>(db: &C, user_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Looks a notification up only if `user_id` owns it.
    pub async fn find_owned<C: ConnectionTrait>(
        db: &C,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn mark_read<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        if self.read {
            return Ok(self);
        }
        let mut active_model: ActiveModel = self.into();
        active_model.read = Set(true);
        active_model.update(db).await
    }

    /// Flips every unread notification of `user_id`; returns how many changed.
    pub async fn mark_all_read<C: ConnectionTrait>(db: &C, user_id: i64) -> Result<u64, DbErr> {
        let result = Entity::update_many()
            .col_expr(Column::Read, Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Read.eq(false))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
