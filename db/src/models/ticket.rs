use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub description: String,

    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,

    /// Owning user. Written once at insert and never updated.
    pub created_by: i64,
    pub assigned_to: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_category")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketCategory {
    #[sea_orm(string_value = "technical")]
    Technical,

    #[sea_orm(string_value = "billing")]
    Billing,

    #[default]
    #[sea_orm(string_value = "general")]
    General,

    #[sea_orm(string_value = "feedback")]
    Feedback,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_priority")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketPriority {
    #[sea_orm(string_value = "low")]
    Low,

    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,

    #[sea_orm(string_value = "high")]
    High,

    #[sea_orm(string_value = "critical")]
    Critical,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TicketStatus {
    #[default]
    #[sea_orm(string_value = "open")]
    Open,

    #[sea_orm(string_value = "in-progress")]
    InProgress,

    #[sea_orm(string_value = "resolved")]
    Resolved,

    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AssignedTo",
        to = "super::user::Column::Id"
    )]
    Assignee,

    #[sea_orm(has_many = "super::ticket_comment::Entity")]
    Comments,
}

impl Related<super::ticket_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields accepted when filing a ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub created_by: i64,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketPatch {
    pub status: Option<TicketStatus>,
    pub assigned_to: Option<i64>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assigned_to.is_none()
    }
}

impl Model {
    /// Inserts a ticket. Status starts at `open` and the ticket is unassigned.
    pub async fn create(db: &DbConn, new: NewTicket) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            category: Set(new.category),
            priority: Set(new.priority),
            status: Set(TicketStatus::Open),
            created_by: Set(new.created_by),
            assigned_to: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn get_by_id(db: &DbConn, ticket_id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(ticket_id).one(db).await
    }

    /// Every ticket, newest first.
    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Tickets filed by `user_id`, newest first.
    pub async fn find_by_creator(db: &DbConn, user_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CreatedBy.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Writes the fields present in `patch` onto the ticket.
    ///
    /// This is a plain read-modify-write: concurrent patches to the same ticket race and
    /// the last writer wins for each column it sets.
    pub async fn update(
        db: &DbConn,
        ticket_id: i64,
        patch: TicketPatch,
    ) -> Result<Option<Model>, DbErr> {
        let Some(model) = Self::get_by_id(db, ticket_id).await? else {
            return Ok(None);
        };

        let mut active_model: ActiveModel = model.into();
        if let Some(status) = patch.status {
            active_model.status = Set(status);
        }
        if let Some(assignee) = patch.assigned_to {
            active_model.assigned_to = Set(Some(assignee));
        }
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await.map(Some)
    }

    /// Bumps `updated_at` without touching anything else.
    pub async fn touch(db: &DbConn, ticket_id: i64) -> Result<(), DbErr> {
        let active_model = ActiveModel {
            id: Set(ticket_id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        active_model.update(db).await.map(|_| ())
    }

    /// Removes the ticket and its comments. Returns `false` if nothing was deleted.
    pub async fn delete_by_id(db: &DbConn, ticket_id: i64) -> Result<bool, DbErr> {
        let txn = db.begin().await?;

        super::ticket_comment::Entity::delete_many()
            .filter(super::ticket_comment::Column::TicketId.eq(ticket_id))
            .exec(&txn)
            .await?;
        let res = Entity::delete_by_id(ticket_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
