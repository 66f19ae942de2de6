use crate::seed::Seeder;
use db::models::user::{self, Role};
use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use services::{ServiceError, requests::RegisterUser, user_service::UserService};

pub const DEMO_PASSWORD: &str = "password123";

/// One account per role, all sharing [`DEMO_PASSWORD`].
const DEMO_ACCOUNTS: [(&str, &str, &str, Role); 4] = [
    ("Admin", "UNISON", "admin", Role::Admin),
    ("Técnico", "Soporte", "tecnico", Role::Tecnico),
    ("Profesor", "Ejemplo", "profesor", Role::Profesor),
    ("Estudiante", "Ejemplo", "estudiante", Role::Estudiante),
];

const EXTRA_STUDENTS: usize = 8;

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        if user::Entity::find().count(db).await? > 0 {
            return Ok(());
        }

        for (first_name, last_name, local_part, role) in DEMO_ACCOUNTS {
            register(db, first_name.into(), last_name.into(), local_part, role).await?;
        }

        for i in 0..EXTRA_STUDENTS {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let local_part = format!("a{:09}", 220_000_000 + i);
            register(db, first_name, last_name, &local_part, Role::Estudiante).await?;
        }

        Ok(())
    }
}

async fn register(
    db: &DatabaseConnection,
    first_name: String,
    last_name: String,
    local_part: &str,
    role: Role,
) -> Result<(), ServiceError> {
    let domain = util::config::AppConfig::global()
        .institution_email_domain
        .clone();
    UserService::register(
        db,
        RegisterUser {
            first_name,
            last_name,
            email: format!("{local_part}@{domain}"),
            password: DEMO_PASSWORD.into(),
            role,
        },
    )
    .await?;
    Ok(())
}
