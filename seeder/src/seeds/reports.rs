use crate::seed::Seeder;
use db::models::{
    reports::{self, ReportType},
    user,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use services::{
    Actor, ServiceError, feedback_service::FeedbackService, requests::CreateReport,
};

const SAMPLES: [(&str, &str, ReportType); 3] = [
    (
        "El tablero tarda en cargar",
        "La lista de tickets tarda más de diez segundos en mostrarse.",
        ReportType::Performance,
    ),
    (
        "Notificaciones duplicadas",
        "Recibí dos avisos por el mismo comentario.",
        ReportType::Issue,
    ),
    (
        "Filtrar por técnico",
        "Sería útil filtrar la lista por técnico asignado.",
        ReportType::Suggestion,
    ),
];

pub struct ReportSeeder;

#[async_trait::async_trait]
impl Seeder for ReportSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        if reports::Entity::find().count(db).await? > 0 {
            return Ok(());
        }

        let users = user::Entity::find().all(db).await?;
        for ((title, description, report_type), author) in SAMPLES.into_iter().zip(users.iter().cycle()) {
            FeedbackService::create_report(
                db,
                &Actor::new(author.id, author.role),
                CreateReport {
                    title: title.into(),
                    description: description.into(),
                    report_type,
                },
            )
            .await?;
        }
        Ok(())
    }
}
