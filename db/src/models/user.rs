use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Institutional address, stored lowercased.
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    pub password_hash: String,
    /// Fixed at registration.
    pub role: Role,
    pub theme: Theme,
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
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "estudiante")]
    Estudiante,
    #[sea_orm(string_value = "profesor")]
    Profesor,
    #[sea_orm(string_value = "tecnico")]
    Tecnico,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    /// Technicians and admins triage tickets.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Tecnico | Role::Admin)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_theme")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    #[sea_orm(string_value = "light")]
    Light,
    #[sea_orm(string_value = "dark")]
    Dark,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
    #[sea_orm(has_many = "super::password_reset_token::Entity")]
    PasswordResetTokens,
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl Related<super::password_reset_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PasswordResetTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            first_name: Set(first_name.trim().to_owned()),
            last_name: Set(last_name.trim().to_owned()),
            email: Set(email.trim().to_lowercase()),
            password_hash: Set(password_hash.to_owned()),
            role: Set(role),
            theme: Set(Theme::Light),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await
    }

    /// Loads every user whose id is in `ids`, in id order.
    pub async fn find_many_by_ids<C: ConnectionTrait>(
        db: &C,
        ids: &[i64],
    ) -> Result<Vec<Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn set_theme<C: ConnectionTrait>(
        self,
        db: &C,
        theme: Theme,
    ) -> Result<Model, DbErr> {
        let mut active_model: ActiveModel = self.into();
        active_model.theme = Set(theme);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    pub async fn set_password_hash<C: ConnectionTrait>(
        self,
        db: &C,
        password_hash: String,
    ) -> Result<Model, DbErr> {
        let mut active_model: ActiveModel = self.into();
        active_model.password_hash = Set(password_hash);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
