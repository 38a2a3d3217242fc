//! Check Session Use Case
//!
//! Resolves the `sl_auth` cookie on a request to a verified user id.

use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::Utc;

use crate::application::config::{AuthConfig, SESSION_COOKIE_NAME};
use crate::application::session_token;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase {
    config: Arc<AuthConfig>,
}

impl CheckSessionUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// A missing cookie and a bad token are the same error
    pub fn execute(&self, headers: &HeaderMap) -> AuthResult<UserId> {
        let token =
            platform::cookie::extract_cookie(headers, SESSION_COOKIE_NAME).ok_or_else(|| {
                tracing::debug!("No session cookie");
                AuthError::InvalidToken
            })?;

        session_token::validate_at(
            &token,
            self.config.session_secret.as_bytes(),
            Utc::now(),
            self.config.clock_skew,
        )
    }
}
