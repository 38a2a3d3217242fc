//! Auth (Authentication & Session Guard) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects, user entity, the user store contract
//! - `application/` - Token codec, cookie factory, input validation, use cases
//! - `infra/` - User store implementations (PostgreSQL, in-memory)
//! - `presentation/` - Request guards, HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; unknown email and wrong password are
//!   indistinguishable to the client
//! - Stateless HS256 session tokens in an `HttpOnly`, `SameSite=Lax` cookie
//! - A missing or invalid session always yields the same redirect
//! - State-changing form and JSON routes require an exact `Origin` match
//!   and the expected `Content-Type`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError, SigningSecret};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserStore, postgres::PgUserStore};
pub use presentation::middleware::{AuthenticatedUser, RequiredMediaType};
pub use presentation::router::{
    auth_router, auth_router_generic, with_api_guard, with_session_guard,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
