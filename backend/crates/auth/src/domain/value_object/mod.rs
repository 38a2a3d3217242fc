//! Value Object Module

pub mod credential;
pub mod email;
pub mod person_name;
pub mod user_id;
