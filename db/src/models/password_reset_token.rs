use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

const TOKEN_LENGTH: usize = 32;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "password_reset_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    #[sea_orm(unique)]
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
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

fn random_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        expiry_minutes: i64,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        ActiveModel {
            user_id: Set(user_id),
            token: Set(random_token()),
            expires_at: Set(now + Duration::minutes(expiry_minutes)),
            used: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Unused and unexpired only.
    pub async fn find_valid_token<C: ConnectionTrait>(
        db: &C,
        token: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Token.eq(token))
            .filter(Column::Used.eq(false))
            .filter(Column::ExpiresAt.gt(Utc::now()))
            .one(db)
            .await
    }

    pub async fn mark_as_used<C: ConnectionTrait>(self, db: &C) -> Result<Self, DbErr> {
        let mut active_model: ActiveModel = self.into();
        active_model.used = Set(true);
        active_model.update(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::test_utils::{insert_user, setup_test_db};

    #[tokio::test]
    async fn tokens_stop_validating_once_used_or_expired() {
        let db = setup_test_db().await;
        let user = insert_user(&db, "Rosa", Role::Estudiante).await;

        let token = Model::create(&db, user.id, 60).await.unwrap();
        assert_eq!(token.token.len(), TOKEN_LENGTH);
        assert!(token.token.chars().all(|c| c.is_ascii_alphanumeric()));

        let found = Model::find_valid_token(&db, &token.token).await.unwrap();
        assert!(found.is_some());

        token.clone().mark_as_used(&db).await.unwrap();
        assert!(Model::find_valid_token(&db, &token.token).await.unwrap().is_none());

        let expired = Model::create(&db, user.id, -1).await.unwrap();
        assert!(Model::find_valid_token(&db, &expired.token).await.unwrap().is_none());
    }
}
