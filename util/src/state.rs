//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds shared resources such as the database connection and the token
//! signer. It is cloned into route handlers via Axum's `State<T>` extractor.

use crate::token::TokenSigner;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The bearer token signer used by the auth extractor and login routes.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    tokens: Arc<dyn TokenSigner>,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and token signer.
    pub fn new(db: DatabaseConnection, tokens: Arc<dyn TokenSigner>) -> Self {
        Self { db, tokens }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn tokens(&self) -> &dyn TokenSigner {
        self.tokens.as_ref()
    }
}
