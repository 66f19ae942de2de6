pub mod comments;
pub mod notifications;
pub mod password_reset_token;
pub mod reports;
pub mod ticket_history;
pub mod tickets;
pub mod user;

pub use comments::Entity as Comment;
pub use notifications::Entity as Notification;
pub use password_reset_token::Entity as PasswordResetToken;
pub use reports::Entity as Report;
pub use ticket_history::Entity as TicketHistory;
pub use tickets::Entity as Ticket;
pub use user::Entity as User;
