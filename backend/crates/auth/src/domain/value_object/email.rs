//! Email Value Object
//!
//! Addresses are parsed with lettre's RFC 5322 mailbox grammar. A display
//! name, if present, is dropped. Case is preserved as submitted.

use std::str::FromStr;

use derive_more::Display;
use lettre::message::Mailbox;

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{value}")]
pub struct Email {
    value: String,
}

impl Email {
    /// Trim, reject control characters, then parse as a mailbox
    pub fn parse(raw: &str) -> AuthResult<Self> {
        let trimmed = raw.trim();

        if trimmed.chars().any(char::is_control) {
            return Err(AuthError::InvalidCharacters);
        }

        let mailbox = Mailbox::from_str(trimmed).map_err(|_| AuthError::InvalidEmail)?;
        let value = mailbox.email.to_string();
        if value.is_empty() {
            return Err(AuthError::InvalidEmail);
        }

        Ok(Self { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
