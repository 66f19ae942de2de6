use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::models::user::{self, Role};

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Inserts a user with a placeholder hash; enough for tests that never log in.
pub async fn insert_user(db: &DatabaseConnection, first_name: &str, role: Role) -> user::Model {
    let email = format!("{}@unison.mx", first_name.to_lowercase());
    user::Model::create(db, first_name, "Tester", &email, "not-a-real-hash", role)
        .await
        .expect("Failed to insert test user")
}
