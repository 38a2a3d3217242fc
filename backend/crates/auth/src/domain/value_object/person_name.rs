//! Person Name Value Object
//!
//! First and last names as accepted at registration: trimmed, NFC-composed,
//! at most 50 code points, letters only with single inner spaces or hyphens.

use std::sync::LazyLock;

use derive_more::Display;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Maximum name length in Unicode code points
pub const NAME_MAX_LENGTH: usize = 50;

/// One or more letter runs joined by a single space or hyphen
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{L}+(?:[- ]\p{L}+)*$").expect("name pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{value}")]
pub struct PersonName {
    value: String,
}

impl PersonName {
    /// Full check of a single raw name
    pub fn parse(raw: &str) -> AuthResult<Self> {
        Self::from_normalized(normalize(raw)?)
    }

    /// Shape check on an already [`normalize`]d name
    pub fn from_normalized(value: String) -> AuthResult<Self> {
        if !NAME_PATTERN.is_match(&value) {
            return Err(AuthError::InvalidFormat);
        }
        Ok(Self { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// Trim, compose to NFC, then enforce length and control-character rules
///
/// The shape rule is left to [`PersonName::from_normalized`] so a caller
/// checking several names can report length problems on all of them first.
pub fn normalize(raw: &str) -> AuthResult<String> {
    let value: String = raw.trim().nfc().collect();

    if value.chars().count() > NAME_MAX_LENGTH {
        return Err(AuthError::InputTooLong);
    }
    if value.chars().any(char::is_control) {
        return Err(AuthError::InvalidCharacters);
    }

    Ok(value)
}
