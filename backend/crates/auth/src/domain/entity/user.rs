//! User Entity
//!
//! The slice of a user account the auth core reads and writes.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    credential::Credential, email::Email, person_name::PersonName, user_id::UserId,
};

/// Stored account as returned by a lookup
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub credential: Credential,
    /// Inactive accounts cannot sign in
    pub active: bool,
}

/// Validated registration ready to persist
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub credential: Credential,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: Email,
        credential: Credential,
    ) -> Self {
        Self {
            user_id: UserId::new(),
            first_name,
            last_name,
            email,
            credential,
            created_at: Utc::now(),
        }
    }

    /// What a lookup by email returns right after creation
    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            user_id: self.user_id,
            credential: self.credential.clone(),
            active: true,
        }
    }
}
