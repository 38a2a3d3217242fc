//! Platform Crate - Technical Infrastructure
//!
//! Building blocks with no knowledge of users or sessions:
//! - HMAC-SHA256 and base64url helpers
//! - Compact HS256 signed tokens (`header.claims.signature`)
//! - Password hashing (Argon2id)
//! - Cookie descriptors and `Cookie` header parsing
//! - Media type parsing for `Content-Type` enforcement

pub mod cookie;
pub mod crypto;
pub mod jws;
pub mod media_type;
pub mod password;
