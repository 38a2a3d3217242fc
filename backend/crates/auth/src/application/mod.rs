//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod session_cookie;
pub mod session_token;
pub mod sign_in;
pub mod sign_up;
pub mod validate_input;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use validate_input::{ValidatedInput, ValidationScenario, validate_input};
