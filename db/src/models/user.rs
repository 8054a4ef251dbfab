use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set, SqlErr};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents an account in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique, lowercased email address.
    pub email: String,
    /// Salted one-way password hash (PHC string).
    pub password_hash: String,
    /// Global role deciding what the account may do.
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three global roles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[default]
    #[sea_orm(string_value = "user")]
    User,

    #[sea_orm(string_value = "agent")]
    Agent,

    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Tickets reference users twice (creator and assignee), so the joins live on the ticket side.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new account unless the email is already taken.
    ///
    /// Returns `Ok(None)` when another account owns `email`. The unique index is the
    /// final arbiter, so a concurrent insert that slips past the lookup also yields `None`.
    /// `email` is expected to be normalized by the caller.
    pub async fn insert_if_email_unique(
        db: &DbConn,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<Option<Model>, DbErr> {
        if Self::find_by_email(db, email).await?.is_some() {
            return Ok(None);
        }

        let now = Utc::now();
        let active = ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match active.insert(db).await {
            Ok(model) => Ok(Some(model)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await
    }

    pub async fn get_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All accounts, most recently created first.
    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_role(db: &DbConn, role: Role) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Role.eq(role))
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }

    pub async fn find_by_ids(db: &DbConn, ids: Vec<i64>) -> Result<Vec<Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find().filter(Column::Id.is_in(ids)).all(db).await
    }

    /// Sets the role of `id`. Returns `Ok(None)` if no such account exists.
    pub async fn update_role(db: &DbConn, id: i64, role: Role) -> Result<Option<Model>, DbErr> {
        let Some(model) = Self::get_by_id(db, id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.role = Set(role);
        active.updated_at = Set(Utc::now());
        active.update(db).await.map(Some)
    }
}
