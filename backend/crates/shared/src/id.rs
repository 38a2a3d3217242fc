//! Typed identifiers
//!
//! `Id<T>` wraps a UUID and tags it with a marker type so identifiers of
//! different entities cannot be mixed up.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id = UserId::new();
/// let parsed: UserId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<fn() -> T>,
}

/// Length of the hyphenated form `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
const HYPHENATED_LEN: usize = 36;

/// Error returned when a string is not a hyphenated UUID
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier is not a valid UUID")]
pub struct ParseIdError;

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

// Manual impls: derives would demand `T: Clone`, `T: Eq`, ... on the marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

/// Hyphenated lowercase form, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`
impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value.hyphenated(), f)
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIdError;

    /// Only the hyphenated form is accepted; braced, URN and simple forms are not
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HYPHENATED_LEN {
            return Err(ParseIdError);
        }
        Uuid::parse_str(s)
            .map(Self::from_uuid)
            .map_err(|_| ParseIdError)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for entity IDs
pub mod markers {
    /// Marker for registered users
    pub struct User;
}

pub type UserId = Id<markers::User>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_v4() {
        let id = UserId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("not-a-uuid".parse::<UserId>(), Err(ParseIdError));
        assert!("".parse::<UserId>().is_err());
    }

    #[test]
    fn test_parse_accepts_hyphenated_only() {
        let hyphenated = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert!(hyphenated.parse::<UserId>().is_ok());
        assert!("67E55044-10B1-426F-9247-BB680E5FE0C8".parse::<UserId>().is_ok());

        for other in [
            "{67e55044-10b1-426f-9247-bb680e5fe0c8}",
            "urn:uuid:67e55044-10b1-426f-9247-bb680e5fe0c8",
            "67e5504410b1426f9247bb680e5fe0c8",
        ] {
            assert_eq!(other.parse::<UserId>(), Err(ParseIdError), "{other}");
        }
    }

    #[test]
    fn test_copy_without_marker_bounds() {
        let id = UserId::new();
        let copy = id;
        assert_eq!(id, copy);
    }
}
