pub mod ticket;
pub mod ticket_comment;
pub mod user;

pub use ticket::Entity as Ticket;
pub use ticket_comment::Entity as TicketComment;
pub use user::Entity as User;
