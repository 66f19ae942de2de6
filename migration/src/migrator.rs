use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510010001_create_users::Migration),
            Box::new(migrations::m202510010002_create_tickets::Migration),
            Box::new(migrations::m202510010003_create_comments::Migration),
            Box::new(migrations::m202510010004_create_ticket_history::Migration),
            Box::new(migrations::m202510010005_create_notifications::Migration),
            Box::new(migrations::m202510010006_create_password_reset_tokens::Migration),
            Box::new(migrations::m202510010007_create_reports::Migration),
        ]
    }
}
