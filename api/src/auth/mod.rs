pub mod extractors;
pub mod guards;
pub mod middleware;

use db::models::user;
use services::authorization::Actor;

/// The account behind a verified bearer token, loaded fresh from the store.
///
/// The role is read from the account row rather than the token, so role changes
/// take effect on the next request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::from(&self.0)
    }
}
