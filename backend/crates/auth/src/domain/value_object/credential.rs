//! Credential Value Object
//!
//! The stored, one-way form of a user's password. Delegates to
//! `platform::password` for the Argon2id work.

use std::fmt;

use platform::password::{self, ClearTextPassword, HashedPassword};

use crate::error::{AuthError, AuthResult};

/// Argon2id PHC string; algorithm, parameters and salt travel inside it
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(HashedPassword);

impl Credential {
    /// Apply the password policy, then hash with a fresh salt
    ///
    /// CPU-heavy; run it off the async executor.
    pub fn hash(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw)?;
        Ok(Self(clear_text.hash()?))
    }

    /// Rebuild from a stored PHC string
    pub fn from_phc_string(s: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(s)
            .map(Self)
            .map_err(|e| AuthError::Internal(format!("Stored credential unreadable: {e}")))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Check a candidate through the hash primitive's verifier
    pub fn verify(&self, candidate: &ClearTextPassword) -> bool {
        self.0.verify(candidate)
    }

    /// Verify against `credential` if there is one, else spend the same
    /// effort on a dummy hash and fail
    pub fn verify_or_dummy(credential: Option<&Credential>, candidate: &ClearTextPassword) -> bool {
        match credential {
            Some(credential) => credential.verify(candidate),
            None => password::verify_dummy(candidate),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[HASH]").finish()
    }
}
