//! Domain Layer
//!
//! Contains entities, value objects, and the user store contract.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::{NewUser, UserRecord};
pub use repository::UserStore;
