use crate::seed::{Seeder, run_seeder};
use crate::seeds::{ticket::TicketSeeder, user::UserSeeder};

mod seed;
mod seeds;

/// Fills a migrated database with demo accounts and tickets.
///
/// Safe to run twice: existing accounts are left alone and tickets are only
/// added for a demo user that has none.
#[tokio::main]
async fn main() {
    let db = db::connect().await;

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(TicketSeeder), "Ticket"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
