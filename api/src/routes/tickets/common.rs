use chrono::{DateTime, Utc};
use db::models::ticket::{TicketCategory, TicketPriority, TicketStatus};
use db::models::user::{self, Role};
use db::views::{CommentWithAuthor, TicketDetails};
use serde::{Deserialize, Serialize};
use services::authorization::UpdateRequest;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub category: Option<TicketCategory>,
    pub priority: Option<TicketPriority>,
}

/// Proposed changes. Either field may be omitted.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTicketRequest {
    pub status: Option<TicketStatus>,
    #[serde(alias = "assignedTo")]
    pub assigned_to: Option<i64>,
}

impl From<UpdateTicketRequest> for UpdateRequest {
    fn from(req: UpdateTicketRequest) -> Self {
        UpdateRequest {
            status: req.status,
            assigned_to: req.assigned_to,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<user::Model> for UserSummary {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentAuthor {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    pub user: Option<CommentAuthor>,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(c: CommentWithAuthor) -> Self {
        Self {
            id: c.comment.id,
            text: c.comment.text,
            user: c.author.map(|a| CommentAuthor {
                id: a.id,
                name: a.name,
                role: a.role,
            }),
            created_at: c.comment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_by: Option<UserSummary>,
    pub assigned_to: Option<UserSummary>,
    pub comments: Vec<CommentResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TicketDetails> for TicketResponse {
    fn from(d: TicketDetails) -> Self {
        Self {
            id: d.ticket.id,
            title: d.ticket.title,
            description: d.ticket.description,
            category: d.ticket.category,
            priority: d.ticket.priority,
            status: d.ticket.status,
            created_by: d.creator.map(UserSummary::from),
            assigned_to: d.assignee.map(UserSummary::from),
            comments: d.comments.into_iter().map(CommentResponse::from).collect(),
            created_at: d.ticket.created_at.to_rfc3339(),
            updated_at: d.ticket.updated_at.to_rfc3339(),
        }
    }
}
