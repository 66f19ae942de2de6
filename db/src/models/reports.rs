use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// User feedback about the service, reviewed by admins.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    #[sea_orm(column_name = "type")]
    pub report_type: ReportType,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "report_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportType {
    #[sea_orm(string_value = "performance")]
    Performance,
    #[sea_orm(string_value = "issue")]
    Issue,
    #[sea_orm(string_value = "suggestion")]
    Suggestion,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "report_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReportStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_review")]
    InReview,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
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
        report_type: ReportType,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            user_id: Set(user_id),
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            report_type: Set(report_type),
            status: Set(ReportStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Newest first, optionally restricted to one author.
    pub async fn find_all<C: ConnectionTrait>(
        db: &C,
        user_id: Option<i64>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();
        if let Some(user_id) = user_id {
            query = query.filter(Column::UserId.eq(user_id));
        }
        query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn set_status<C: ConnectionTrait>(
        self,
        db: &C,
        status: ReportStatus,
    ) -> Result<Model, DbErr> {
        let mut active_model: ActiveModel = self.into();
        active_model.status = Set(status);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }
}
