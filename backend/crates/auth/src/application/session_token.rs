//! Session Token Codec
//!
//! Issues and validates the stateless session token: a compact HS256 JWS
//! over `{iss, sub, iat, exp}`. Every failure surfaces as
//! `AuthError::InvalidToken`; the specific reason is only logged at debug.

use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::jws;
use serde::{Deserialize, Serialize};

use crate::application::config::SESSION_ISSUER;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Default tolerance for an `iat` slightly ahead of the local clock
pub const DEFAULT_CLOCK_SKEW: Duration = Duration::from_secs(60);

/// Claim set carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    pub sub: String,
    /// Seconds since the Unix epoch
    pub iat: i64,
    /// Seconds since the Unix epoch
    pub exp: i64,
}

/// Issue a token for `subject` valid for `ttl` from now
pub fn issue(subject: UserId, secret: &[u8], ttl: chrono::Duration) -> AuthResult<String> {
    issue_at(subject, secret, ttl, Utc::now())
}

pub fn issue_at(
    subject: UserId,
    secret: &[u8],
    ttl: chrono::Duration,
    now: DateTime<Utc>,
) -> AuthResult<String> {
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AuthError::Internal("Session TTL out of range".to_string()))?;

    let claims = SessionClaims {
        iss: SESSION_ISSUER.to_string(),
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    jws::sign(&claims, secret)
        .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))
}

/// Validate `token` and return its subject
pub fn validate(token: &str, secret: &[u8]) -> AuthResult<UserId> {
    validate_at(token, secret, Utc::now(), DEFAULT_CLOCK_SKEW)
}

/// Validate against an explicit clock
///
/// Accepts only when the signature verifies under `secret` with HS256, the
/// issuer matches, `iat` is no further than `clock_skew` ahead of `now`,
/// `now` is strictly before `exp`, and `sub` is a UUID.
pub fn validate_at(
    token: &str,
    secret: &[u8],
    now: DateTime<Utc>,
    clock_skew: Duration,
) -> AuthResult<UserId> {
    let claims: SessionClaims = jws::verify(token, secret).map_err(|e| {
        tracing::debug!(reason = %e, "Session token rejected");
        AuthError::InvalidToken
    })?;

    let now = now.timestamp();
    let skew = i64::try_from(clock_skew.as_secs()).unwrap_or(i64::MAX);

    let rejection = if claims.iss != SESSION_ISSUER {
        Some("issuer mismatch")
    } else if claims.iat > now.saturating_add(skew) {
        Some("issued in the future")
    } else if now >= claims.exp {
        Some("expired")
    } else {
        None
    };
    if let Some(reason) = rejection {
        tracing::debug!(reason, "Session token rejected");
        return Err(AuthError::InvalidToken);
    }

    claims.sub.parse::<UserId>().map_err(|_| {
        tracing::debug!(
            reason = "subject is not a user id",
            "Session token rejected"
        );
        AuthError::InvalidToken
    })
}
