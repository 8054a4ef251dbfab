//! Ticket lifecycle: filing, reading, updating, commenting and deleting.
//!
//! Each operation loads what it needs, asks [`crate::authorization`] for a decision
//! and only then writes. A rejected request never reaches the store.

use crate::authorization::{
    self, Actor, UpdateRequest, Visibility, authorize_comment, authorize_delete,
    authorize_update, authorize_view,
};
use crate::error::{ServiceError, ServiceResult};
use db::models::ticket::{self, NewTicket, TicketCategory, TicketPriority};
use db::models::{ticket_comment, user};
use db::views::TicketDetails;
use sea_orm::DatabaseConnection;

/// Input for filing a ticket. Missing category/priority take their defaults.
#[derive(Debug, Clone, Default)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub category: Option<TicketCategory>,
    pub priority: Option<TicketPriority>,
}

pub struct TicketService;

impl TicketService {
    pub async fn create(
        db: &DatabaseConnection,
        actor: &Actor,
        params: CreateTicket,
    ) -> ServiceResult<TicketDetails> {
        let title = params.title.trim();
        if title.is_empty() {
            return Err(ServiceError::invalid("Title is required"));
        }
        if params.description.trim().is_empty() {
            return Err(ServiceError::invalid("Description is required"));
        }

        let ticket = ticket::Model::create(
            db,
            NewTicket {
                title: title.to_owned(),
                description: params.description,
                category: params.category.unwrap_or_default(),
                priority: params.priority.unwrap_or_default(),
                created_by: actor.id,
            },
        )
        .await?;

        tracing::info!(ticket_id = ticket.id, user_id = actor.id, "Ticket created");
        Ok(TicketDetails::load(db, ticket).await?)
    }

    /// Tickets visible to the actor, newest first.
    pub async fn list(db: &DatabaseConnection, actor: &Actor) -> ServiceResult<Vec<TicketDetails>> {
        let tickets = match authorization::visibility(actor) {
            Visibility::Own(user_id) => ticket::Model::find_by_creator(db, user_id).await?,
            Visibility::All => ticket::Model::find_all(db).await?,
        };
        Ok(TicketDetails::load_many(db, tickets).await?)
    }

    pub async fn get(
        db: &DatabaseConnection,
        actor: &Actor,
        ticket_id: i64,
    ) -> ServiceResult<TicketDetails> {
        let ticket = Self::find(db, ticket_id).await?;
        authorize_view(actor, &ticket)?;
        Ok(TicketDetails::load(db, ticket).await?)
    }

    /// Applies a status and/or assignee change.
    ///
    /// The request is checked as a whole; on rejection nothing is written. A new
    /// assignee must be an existing agent account.
    pub async fn apply_update(
        db: &DatabaseConnection,
        actor: &Actor,
        ticket_id: i64,
        request: UpdateRequest,
    ) -> ServiceResult<TicketDetails> {
        let ticket = Self::find(db, ticket_id).await?;

        let patch = authorize_update(actor, &ticket, &request).inspect_err(|denied| {
            tracing::warn!(
                ticket_id,
                user_id = actor.id,
                role = %actor.role,
                reason = %denied,
                "Ticket update rejected"
            );
        })?;

        if let Some(assignee_id) = patch.assigned_to {
            let assignee = user::Model::get_by_id(db, assignee_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Assignee not found"))?;
            if assignee.role != user::Role::Agent {
                return Err(ServiceError::invalid("Assignee must be an agent"));
            }
        }

        if patch.is_empty() {
            return Ok(TicketDetails::load(db, ticket).await?);
        }

        let updated = ticket::Model::update(db, ticket_id, patch.clone())
            .await?
            .ok_or_else(|| ServiceError::not_found("Ticket not found"))?;

        tracing::info!(
            ticket_id,
            user_id = actor.id,
            status = ?patch.status,
            assigned_to = ?patch.assigned_to,
            "Ticket updated"
        );
        Ok(TicketDetails::load(db, updated).await?)
    }

    pub async fn add_comment(
        db: &DatabaseConnection,
        actor: &Actor,
        ticket_id: i64,
        text: &str,
    ) -> ServiceResult<TicketDetails> {
        if text.trim().is_empty() {
            return Err(ServiceError::invalid("Comment text is required"));
        }

        let ticket = Self::find(db, ticket_id).await?;
        authorize_comment(actor, &ticket)?;

        ticket_comment::Model::append(db, ticket_id, actor.id, text).await?;
        ticket::Model::touch(db, ticket_id).await?;

        let ticket = Self::find(db, ticket_id).await?;
        Ok(TicketDetails::load(db, ticket).await?)
    }

    /// Admin only. Permission is checked before existence.
    pub async fn delete(db: &DatabaseConnection, actor: &Actor, ticket_id: i64) -> ServiceResult<()> {
        authorize_delete(actor)?;

        if !ticket::Model::delete_by_id(db, ticket_id).await? {
            return Err(ServiceError::not_found("Ticket not found"));
        }

        tracing::info!(ticket_id, user_id = actor.id, "Ticket deleted");
        Ok(())
    }

    async fn find(db: &DatabaseConnection, ticket_id: i64) -> ServiceResult<ticket::Model> {
        ticket::Model::get_by_id(db, ticket_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ticket not found"))
    }
}
