use crate::seed::{Seeder, run_seeder};
use crate::seeds::{reports::ReportSeeder, tickets::TicketSeeder, users::UserSeeder};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use util::config::AppConfig;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let database_path = AppConfig::global().database_path.clone();
    let db = db::connect(&database_path)
        .await
        .expect("Failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "Users"),
        (Box::new(TicketSeeder), "Tickets"),
        (Box::new(ReportSeeder), "Reports"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
