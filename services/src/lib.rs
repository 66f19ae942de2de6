pub mod actor;
pub mod error;
pub mod feedback_service;
pub mod history_service;
pub mod notification_service;
pub mod report_service;
pub mod requests;
pub mod ticket_service;
pub mod transition;
pub mod user_service;
pub mod validation;
pub mod views;

pub use actor::Actor;
pub use error::ServiceError;
