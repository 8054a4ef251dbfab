pub mod ticket;
pub mod user;

/// Password shared by every seeded account.
pub const DEMO_PASSWORD: &str = "password123";

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const USER_EMAIL: &str = "user@example.com";
pub const AGENT_EMAILS: [&str; 2] = ["agent1@example.com", "agent2@example.com"];
