use colored::*;
use futures::FutureExt;
use migration::Migrator;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

pub async fn run_all_migrations(url: &str) {
    let db = sea_orm::Database::connect(url)
        .await
        .expect("DB connection failed");

    println!("Running migrations...");
    let schema_manager = SchemaManager::new(&db);

    for migration in Migrator::migrations() {
        run_migration(&schema_manager, migration).await;
    }
}

/// Drops every table, newest migration first.
pub async fn rollback_all_migrations(url: &str) {
    let db = sea_orm::Database::connect(url)
        .await
        .expect("DB connection failed");

    println!("Rolling back migrations...");
    let schema_manager = SchemaManager::new(&db);

    for migration in Migrator::migrations().into_iter().rev() {
        print_label(&format!("Reverting {}", migration.name().bold()));
        let start = Instant::now();
        match migration.down(&schema_manager).await {
            Ok(()) => report_done(start),
            Err(e) => {
                println!("{} {}", "failed".red(), e);
                std::process::exit(1);
            }
        }
    }
}

async fn run_migration(schema_manager: &SchemaManager<'_>, migration: Box<dyn MigrationTrait>) {
    print_label(&format!("Applying {}", migration.name().bold()));

    let start = Instant::now();
    let result = std::panic::AssertUnwindSafe(migration.up(schema_manager))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(())) => report_done(start),
        Ok(Err(e)) => {
            println!("{} {}", "failed".red(), e);
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "failed".red());
            std::process::exit(1);
        }
    }
}

fn print_label(label: &str) {
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
    print!("{}{} ", label, dots);
    io::stdout().flush().ok();
}

fn report_done(start: Instant) {
    let time_str = format!("({:.2?})", start.elapsed()).dimmed();
    println!("{} {}", "done".green(), time_str);
}
