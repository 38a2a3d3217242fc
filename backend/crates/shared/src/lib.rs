//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - Unified error type (`AppError`) and its HTTP classification (`ErrorKind`)
//! - Typed identifiers (`Id<T>`)
//!
//! Nothing in here knows about sessions, cookies or passwords.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
