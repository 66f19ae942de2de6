use db::models::reports::{self, ReportStatus};
use sea_orm::DatabaseConnection;

use crate::actor::Actor;
use crate::error::ServiceError;
use crate::requests::CreateReport;
use crate::views::{ReportView, load_user_summaries};

/// User feedback reports. Anyone may file one; only admins review them.
pub struct FeedbackService;

impl FeedbackService {
    pub async fn create_report(
        db: &DatabaseConnection,
        actor: &Actor,
        input: CreateReport,
    ) -> Result<ReportView, ServiceError> {
        let report = reports::Model::create(
            db,
            actor.user_id,
            &input.title,
            &input.description,
            input.report_type,
        )
        .await?;
        tracing::info!(report_id = report.id, user_id = actor.user_id, "Report created");
        to_view(db, report).await
    }

    pub async fn list_reports(db: &DatabaseConnection) -> Result<Vec<ReportView>, ServiceError> {
        let items = reports::Model::find_all(db, None).await?;
        to_views(db, items).await
    }

    pub async fn my_reports(
        db: &DatabaseConnection,
        actor: &Actor,
    ) -> Result<Vec<ReportView>, ServiceError> {
        let items = reports::Model::find_all(db, Some(actor.user_id)).await?;
        to_views(db, items).await
    }

    pub async fn get_report(db: &DatabaseConnection, id: i64) -> Result<ReportView, ServiceError> {
        let report = reports::Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report not found"))?;
        to_view(db, report).await
    }

    pub async fn update_report(
        db: &DatabaseConnection,
        actor: &Actor,
        id: i64,
        status: Option<ReportStatus>,
    ) -> Result<ReportView, ServiceError> {
        if !actor.is_admin() {
            return Err(ServiceError::forbidden("Only admins can review reports"));
        }
        let report = reports::Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report not found"))?;

        let report = match status {
            Some(status) => report.set_status(db, status).await?,
            None => report,
        };
        to_view(db, report).await
    }
}

async fn to_view(db: &DatabaseConnection, report: reports::Model) -> Result<ReportView, ServiceError> {
    let users = load_user_summaries(db, [report.user_id]).await?;
    Ok(ReportView::new(report, &users))
}

async fn to_views(
    db: &DatabaseConnection,
    items: Vec<reports::Model>,
) -> Result<Vec<ReportView>, ServiceError> {
    let users = load_user_summaries(db, items.iter().map(|r| r.user_id).collect::<Vec<_>>()).await?;
    Ok(items.into_iter().map(|r| ReportView::new(r, &users)).collect())
}
