//! Read-side joins that resolve the user references on tickets and comments.

use crate::models::{ticket, ticket_comment, user};
use sea_orm::{DbConn, DbErr};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: ticket_comment::Model,
    pub author: Option<user::Model>,
}

/// A ticket with its creator, assignee and comment authors loaded.
#[derive(Debug, Clone)]
pub struct TicketDetails {
    pub ticket: ticket::Model,
    pub creator: Option<user::Model>,
    pub assignee: Option<user::Model>,
    pub comments: Vec<CommentWithAuthor>,
}

impl TicketDetails {
    pub async fn load(db: &DbConn, ticket: ticket::Model) -> Result<TicketDetails, DbErr> {
        let mut loaded = Self::load_many(db, vec![ticket]).await?;
        Ok(loaded.remove(0))
    }

    /// Resolves references for a batch of tickets with one query per table, keeping order.
    pub async fn load_many(
        db: &DbConn,
        tickets: Vec<ticket::Model>,
    ) -> Result<Vec<TicketDetails>, DbErr> {
        let ticket_ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();
        let comments = ticket_comment::Model::find_for_tickets(db, ticket_ids).await?;

        let mut user_ids: Vec<i64> = tickets
            .iter()
            .flat_map(|t| std::iter::once(t.created_by).chain(t.assigned_to))
            .chain(comments.iter().map(|c| c.user_id))
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let users: HashMap<i64, user::Model> = user::Model::find_by_ids(db, user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut by_ticket: HashMap<i64, Vec<CommentWithAuthor>> = HashMap::new();
        for comment in comments {
            let author = users.get(&comment.user_id).cloned();
            by_ticket
                .entry(comment.ticket_id)
                .or_default()
                .push(CommentWithAuthor { comment, author });
        }

        Ok(tickets
            .into_iter()
            .map(|ticket| TicketDetails {
                creator: users.get(&ticket.created_by).cloned(),
                assignee: ticket.assigned_to.and_then(|id| users.get(&id).cloned()),
                comments: by_ticket.remove(&ticket.id).unwrap_or_default(),
                ticket,
            })
            .collect())
    }
}
