//! The identifier carried as a session token's subject.

pub use kernel::id::{ParseIdError, UserId};
