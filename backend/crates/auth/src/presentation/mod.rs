//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the request guards.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    ApiGuard, AuthenticatedUser, RequiredMediaType, require_api_contract, require_session,
};
pub use router::{auth_router, auth_router_generic, with_api_guard, with_session_guard};
