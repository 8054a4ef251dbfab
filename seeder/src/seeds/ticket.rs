use crate::seed::Seeder;
use crate::seeds::{AGENT_EMAILS, USER_EMAIL};
use db::models::ticket::{self, NewTicket, TicketCategory, TicketPatch, TicketPriority, TicketStatus};
use db::models::{ticket_comment, user};
use sea_orm::{DatabaseConnection, DbErr};

pub struct TicketSeeder;

const SAMPLES: [(&str, &str, TicketCategory); 5] = [
    (
        "Printer broken",
        "The printer on floor 3 jams on every job.",
        TicketCategory::Technical,
    ),
    (
        "Charged twice",
        "My card was billed twice for the March invoice.",
        TicketCategory::Billing,
    ),
    (
        "Office hours",
        "Is the help desk open on public holidays?",
        TicketCategory::General,
    ),
    (
        "New portal is great",
        "The redesigned portal is much faster, thanks!",
        TicketCategory::Feedback,
    ),
    (
        "VPN drops every hour",
        "The VPN client disconnects roughly every sixty minutes.",
        TicketCategory::Technical,
    ),
];

const PRIORITIES: [TicketPriority; 4] = [
    TicketPriority::Low,
    TicketPriority::Medium,
    TicketPriority::High,
    TicketPriority::Critical,
];

#[async_trait::async_trait]
impl Seeder for TicketSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let Some(owner) = user::Model::find_by_email(db, USER_EMAIL).await? else {
            return Err(DbErr::Custom(format!("{} has not been seeded", USER_EMAIL)));
        };
        if !ticket::Model::find_by_creator(db, owner.id).await?.is_empty() {
            return Ok(());
        }

        let mut agents = Vec::new();
        for email in AGENT_EMAILS {
            if let Some(agent) = user::Model::find_by_email(db, email).await? {
                agents.push(agent);
            }
        }

        for (i, (title, description, category)) in SAMPLES.into_iter().enumerate() {
            let created = ticket::Model::create(
                db,
                NewTicket {
                    title: title.into(),
                    description: description.into(),
                    category,
                    priority: PRIORITIES[fastrand::usize(..PRIORITIES.len())],
                    created_by: owner.id,
                },
            )
            .await?;

            // Leave the first ticket untouched; spread the rest over the agents.
            if i == 0 || agents.is_empty() {
                continue;
            }
            let agent = &agents[i % agents.len()];
            let status = if i % 2 == 0 {
                TicketStatus::InProgress
            } else {
                TicketStatus::Open
            };
            ticket::Model::update(
                db,
                created.id,
                TicketPatch {
                    status: Some(status),
                    assigned_to: Some(agent.id),
                },
            )
            .await?;
            ticket_comment::Model::append(db, created.id, agent.id, "Thanks, we are looking into it.")
                .await?;
        }

        Ok(())
    }
}
