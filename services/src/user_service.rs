use crate::authorization::{Actor, authorize_agent_directory, authorize_user_management};
use crate::error::{ServiceError, ServiceResult};
use crate::password::CredentialHasher;
use common::normalize_email;
use db::models::user::{self, Role};
use sea_orm::DatabaseConnection;
use util::token::{IssuedToken, TokenSigner};
use validator::ValidateEmail;

pub const MIN_PASSWORD_LEN: usize = 6;

/// An authenticated account and the bearer token issued for it.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: user::Model,
    pub token: IssuedToken,
}

pub struct UserService;

impl UserService {
    /// Creates a `user` account and signs it in.
    ///
    /// The email is stored trimmed and lowercased. Registration never grants a
    /// staff role; admins promote accounts through [`UserService::update_role`].
    pub async fn register(
        db: &DatabaseConnection,
        hasher: &dyn CredentialHasher,
        tokens: &dyn TokenSigner,
        name: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<Session> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::invalid("Name is required"));
        }
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(ServiceError::invalid("Invalid email format"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::invalid(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let password_hash = hasher.hash(password)?;
        let user = user::Model::insert_if_email_unique(db, name, &email, &password_hash, Role::User)
            .await?
            .ok_or_else(|| ServiceError::invalid("Email already registered"))?;

        tracing::info!(user_id = user.id, "User registered");
        let token = tokens.sign(user.id)?;
        Ok(Session { user, token })
    }

    /// Checks credentials. Unknown email and wrong password look the same to the caller.
    pub async fn login(
        db: &DatabaseConnection,
        hasher: &dyn CredentialHasher,
        tokens: &dyn TokenSigner,
        email: &str,
        password: &str,
    ) -> ServiceResult<Session> {
        let rejected = || ServiceError::Unauthenticated("Invalid email or password".into());

        let user = user::Model::find_by_email(db, &normalize_email(email))
            .await?
            .ok_or_else(rejected)?;

        if !hasher.verify(password, &user.password_hash) {
            tracing::debug!(user_id = user.id, "Login rejected: wrong password");
            return Err(rejected());
        }

        let token = tokens.sign(user.id)?;
        Ok(Session { user, token })
    }

    pub async fn get(db: &DatabaseConnection, user_id: i64) -> ServiceResult<user::Model> {
        user::Model::get_by_id(db, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }

    pub async fn list_users(db: &DatabaseConnection, actor: &Actor) -> ServiceResult<Vec<user::Model>> {
        authorize_user_management(actor)?;
        Ok(user::Model::find_all(db).await?)
    }

    pub async fn list_agents(db: &DatabaseConnection, actor: &Actor) -> ServiceResult<Vec<user::Model>> {
        authorize_agent_directory(actor)?;
        Ok(user::Model::find_by_role(db, Role::Agent).await?)
    }

    pub async fn update_role(
        db: &DatabaseConnection,
        actor: &Actor,
        user_id: i64,
        role: Role,
    ) -> ServiceResult<user::Model> {
        authorize_user_management(actor)?;

        let updated = user::Model::update_role(db, user_id, role)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;

        tracing::info!(user_id, role = %role, by = actor.id, "User role updated");
        Ok(updated)
    }
}
