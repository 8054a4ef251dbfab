use crate::authorization::Denied;
use sea_orm::DbErr;
use thiserror::Error;
use util::token::TokenError;

/// Failure kinds surfaced by the service layer.
///
/// Everything except `Store` and `Internal` is an expected business outcome; the HTTP layer maps
/// each variant to a status code and echoes the message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Store(#[from] DbErr),

    /// Hashing or signing failed; not the caller's fault.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Denied> for ServiceError {
    fn from(denied: Denied) -> Self {
        ServiceError::Forbidden(denied.to_string())
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => ServiceError::Unauthenticated(err.to_string()),
            TokenError::Signing(msg) => ServiceError::Internal(msg),
        }
    }
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ServiceError::Invalid(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
