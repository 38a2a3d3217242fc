//! In-memory User Store
//!
//! Process-local store for tests and database-less local runs.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, UserRecord};
use crate::domain::repository::UserStore;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Accounts keyed by exact email
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an account inactive; returns whether it existed
    pub async fn deactivate(&self, email: &Email) -> bool {
        match self.users.write().await.get_mut(email.as_str()) {
            Some(user) => {
                user.active = false;
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(email.as_str()).cloned())
    }

    async fn create(&self, user: &NewUser) -> AuthResult<UserId> {
        let mut users = self.users.write().await;
        if users.contains_key(user.email.as_str()) {
            return Err(AuthError::DuplicateEmail);
        }
        users.insert(user.email.as_str().to_string(), user.to_record());
        Ok(user.user_id)
    }
}
