//! Role-based decisions for tickets and accounts.
//!
//! Every function here is pure: it looks at the acting account, the current ticket
//! (where relevant) and the requested change, and either allows it or explains why
//! not. Nothing is read from or written to the store.

use db::models::ticket::{self, TicketPatch, TicketStatus};
use db::models::user::{self, Role};
use thiserror::Error;

/// The authenticated account performing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

impl From<&user::Model> for Actor {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            role: user.role,
        }
    }
}

/// Fields a caller proposes to change on a ticket. Absent fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    pub status: Option<TicketStatus>,
    pub assigned_to: Option<i64>,
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denied {
    #[error("Not allowed to update tickets")]
    UserCannotUpdate,
    #[error("You can only update tickets that are assigned to you")]
    AgentNotAssigned,
    #[error("Agents cannot assign tickets, only admins can")]
    AgentCannotAssign,
    #[error("Admins cannot change ticket status, assign it to an agent first")]
    AdminCannotSetStatus,
    #[error("Not allowed to comment on this ticket")]
    CannotComment,
    #[error("Access denied")]
    CannotView,
    #[error("Only admins can delete tickets")]
    CannotDelete,
    #[error("Only admins can manage users")]
    CannotManageUsers,
    #[error("Only admins and agents can list agents")]
    CannotListAgents,
}

/// Which tickets an actor may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only tickets the actor created.
    Own(i64),
    All,
}

/// Decides which fields of `ticket` the actor may change.
///
/// The whole request is rejected if any proposed field is outside the actor's
/// rights; there is no partial application. On success the returned patch holds
/// exactly the fields to write.
pub fn authorize_update(
    actor: &Actor,
    ticket: &ticket::Model,
    request: &UpdateRequest,
) -> Result<TicketPatch, Denied> {
    match actor.role {
        Role::User => Err(Denied::UserCannotUpdate),
        Role::Agent => {
            if ticket.assigned_to != Some(actor.id) {
                return Err(Denied::AgentNotAssigned);
            }
            if request.assigned_to.is_some() {
                return Err(Denied::AgentCannotAssign);
            }
            Ok(TicketPatch {
                status: request.status,
                assigned_to: None,
            })
        }
        Role::Admin => {
            if request.status.is_some() {
                return Err(Denied::AdminCannotSetStatus);
            }
            Ok(TicketPatch {
                status: None,
                assigned_to: request.assigned_to,
            })
        }
    }
}

/// The creator and all staff may comment.
pub fn authorize_comment(actor: &Actor, ticket: &ticket::Model) -> Result<(), Denied> {
    match actor.role {
        Role::Agent | Role::Admin => Ok(()),
        Role::User if ticket.created_by == actor.id => Ok(()),
        Role::User => Err(Denied::CannotComment),
    }
}

pub fn authorize_view(actor: &Actor, ticket: &ticket::Model) -> Result<(), Denied> {
    match visibility(actor) {
        Visibility::All => Ok(()),
        Visibility::Own(id) if ticket.created_by == id => Ok(()),
        Visibility::Own(_) => Err(Denied::CannotView),
    }
}

pub fn visibility(actor: &Actor) -> Visibility {
    match actor.role {
        Role::User => Visibility::Own(actor.id),
        Role::Agent | Role::Admin => Visibility::All,
    }
}

pub fn authorize_delete(actor: &Actor) -> Result<(), Denied> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::User | Role::Agent => Err(Denied::CannotDelete),
    }
}

/// Listing all accounts and changing roles. Admins may change their own role too.
pub fn authorize_user_management(actor: &Actor) -> Result<(), Denied> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::User | Role::Agent => Err(Denied::CannotManageUsers),
    }
}

pub fn authorize_agent_directory(actor: &Actor) -> Result<(), Denied> {
    match actor.role {
        Role::Admin | Role::Agent => Ok(()),
        Role::User => Err(Denied::CannotListAgents),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use db::models::ticket::{TicketCategory, TicketPriority};

    const OWNER: i64 = 1;
    const AGENT_G: i64 = 2;
    const AGENT_H: i64 = 3;
    const ADMIN: i64 = 4;
    const STRANGER: i64 = 5;

    const ALL_STATUSES: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    fn ticket(assigned_to: Option<i64>) -> ticket::Model {
        let now = Utc::now();
        ticket::Model {
            id: 10,
            title: "Printer broken".into(),
            description: "It jams".into(),
            category: TicketCategory::Technical,
            priority: TicketPriority::High,
            status: TicketStatus::Open,
            created_by: OWNER,
            assigned_to,
            created_at: now,
            updated_at: now,
        }
    }

    fn status(s: TicketStatus) -> UpdateRequest {
        UpdateRequest {
            status: Some(s),
            assigned_to: None,
        }
    }

    fn assign(to: i64) -> UpdateRequest {
        UpdateRequest {
            status: None,
            assigned_to: Some(to),
        }
    }

    #[test]
    fn user_can_never_update() {
        let t = ticket(None);
        let owner = Actor::new(OWNER, Role::User);
        for req in [UpdateRequest::default(), status(TicketStatus::Closed), assign(AGENT_G)] {
            assert_eq!(
                authorize_update(&owner, &t, &req),
                Err(Denied::UserCannotUpdate)
            );
        }
    }

    #[test]
    fn unassigned_agent_is_rejected_for_every_status() {
        let h = Actor::new(AGENT_H, Role::Agent);
        for t in [ticket(None), ticket(Some(AGENT_G))] {
            for s in ALL_STATUSES {
                assert_eq!(
                    authorize_update(&h, &t, &status(s)),
                    Err(Denied::AgentNotAssigned)
                );
            }
            assert_eq!(
                authorize_update(&h, &t, &UpdateRequest::default()),
                Err(Denied::AgentNotAssigned)
            );
        }
    }

    #[test]
    fn assigned_agent_sets_status_only() {
        let g = Actor::new(AGENT_G, Role::Agent);
        let t = ticket(Some(AGENT_G));
        for s in ALL_STATUSES {
            let patch = authorize_update(&g, &t, &status(s)).unwrap();
            assert_eq!(patch.status, Some(s));
            assert_eq!(patch.assigned_to, None);
        }
    }

    #[test]
    fn assigned_agent_combined_request_is_rejected_whole() {
        let g = Actor::new(AGENT_G, Role::Agent);
        let t = ticket(Some(AGENT_G));
        for s in ALL_STATUSES {
            for to in [AGENT_G, AGENT_H] {
                let req = UpdateRequest {
                    status: Some(s),
                    assigned_to: Some(to),
                };
                assert_eq!(
                    authorize_update(&g, &t, &req),
                    Err(Denied::AgentCannotAssign)
                );
            }
        }
    }

    #[test]
    fn agent_without_fields_is_a_no_op() {
        let g = Actor::new(AGENT_G, Role::Agent);
        let patch = authorize_update(&g, &ticket(Some(AGENT_G)), &UpdateRequest::default()).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn admin_assigns_but_never_sets_status() {
        let m = Actor::new(ADMIN, Role::Admin);
        let t = ticket(None);

        let patch = authorize_update(&m, &t, &assign(AGENT_G)).unwrap();
        assert_eq!(patch.assigned_to, Some(AGENT_G));
        assert_eq!(patch.status, None);

        for s in ALL_STATUSES {
            assert_eq!(
                authorize_update(&m, &t, &status(s)),
                Err(Denied::AdminCannotSetStatus)
            );
            let combined = UpdateRequest {
                status: Some(s),
                assigned_to: Some(AGENT_G),
            };
            assert_eq!(
                authorize_update(&m, &t, &combined),
                Err(Denied::AdminCannotSetStatus)
            );
        }
    }

    #[test]
    fn comment_rights() {
        let t = ticket(None);
        assert!(authorize_comment(&Actor::new(OWNER, Role::User), &t).is_ok());
        assert!(authorize_comment(&Actor::new(AGENT_H, Role::Agent), &t).is_ok());
        assert!(authorize_comment(&Actor::new(ADMIN, Role::Admin), &t).is_ok());
        assert_eq!(
            authorize_comment(&Actor::new(STRANGER, Role::User), &t),
            Err(Denied::CannotComment)
        );
    }

    #[test]
    fn view_and_visibility() {
        let t = ticket(None);
        assert_eq!(
            visibility(&Actor::new(OWNER, Role::User)),
            Visibility::Own(OWNER)
        );
        assert_eq!(visibility(&Actor::new(AGENT_G, Role::Agent)), Visibility::All);
        assert!(authorize_view(&Actor::new(OWNER, Role::User), &t).is_ok());
        assert_eq!(
            authorize_view(&Actor::new(STRANGER, Role::User), &t),
            Err(Denied::CannotView)
        );
        assert!(authorize_view(&Actor::new(ADMIN, Role::Admin), &t).is_ok());
    }

    #[test]
    fn admin_only_operations() {
        let admin = Actor::new(ADMIN, Role::Admin);
        let agent = Actor::new(AGENT_G, Role::Agent);
        let user = Actor::new(OWNER, Role::User);

        assert!(authorize_delete(&admin).is_ok());
        assert_eq!(authorize_delete(&agent), Err(Denied::CannotDelete));
        assert_eq!(authorize_delete(&user), Err(Denied::CannotDelete));

        assert!(authorize_user_management(&admin).is_ok());
        assert!(authorize_user_management(&agent).is_err());

        assert!(authorize_agent_directory(&agent).is_ok());
        assert!(authorize_agent_directory(&admin).is_ok());
        assert_eq!(
            authorize_agent_directory(&user),
            Err(Denied::CannotListAgents)
        );
    }
}
