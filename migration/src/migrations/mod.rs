pub mod m202510010001_create_users;
pub mod m202510010002_create_tickets;
pub mod m202510010003_create_comments;
pub mod m202510010004_create_ticket_history;
pub mod m202510010005_create_notifications;
pub mod m202510010006_create_password_reset_tokens;
pub mod m202510010007_create_reports;
