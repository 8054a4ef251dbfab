pub mod authorization;
pub mod error;
pub mod password;
pub mod ticket_service;
pub mod user_service;
