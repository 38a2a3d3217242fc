//! Repository Traits
//!
//! The user store collaborator. Implementations live in the infrastructure layer.

use crate::domain::entity::user::{NewUser, UserRecord};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// User store trait
#[trait_variant::make(UserStore: Send)]
pub trait LocalUserStore {
    /// Find an account by its exact (case-preserved) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserRecord>>;

    /// Persist a new account
    ///
    /// Fails with `AuthError::DuplicateEmail` when the address is taken.
    async fn create(&self, user: &NewUser) -> AuthResult<UserId>;
}
