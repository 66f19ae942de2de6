mod auth_test;
mod comments_test;
mod health_test;
mod notifications_test;
mod reports_test;
mod tickets_test;
