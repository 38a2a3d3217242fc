//! Application Configuration
//!
//! Loaded once at startup and shared read-only as `Arc<AuthConfig>`.

use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{AuthError, AuthResult};

/// Issuer written into and required of every session token
pub const SESSION_ISSUER: &str = "smart-list";

/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "sl_auth";

const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(2 * 3600);
/// Longest session `SESSION_TTL_SECS` may configure
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(366 * 24 * 3600);
const DEFAULT_CLOCK_SKEW: Duration = Duration::from_secs(60);
const DEFAULT_ORIGIN: &str = "http://localhost:8888";
const RECOMMENDED_SECRET_LEN: usize = 32;

/// Configuration load failures; all of them abort startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET must be set and non-empty")]
    MissingSecret,

    #[error("{name} has an invalid value: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// HMAC signing secret, redacted in `Debug` and wiped on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn random() -> Self {
        Self(platform::crypto::random_bytes(RECOMMENDED_SECRET_LEN))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_secret: SigningSecret,
    pub session_ttl: Duration,
    /// Whether the session cookie carries `Secure`
    pub cookie_secure: bool,
    /// Exact value the `Origin` header must carry on guarded API calls
    pub expected_origin: String,
    pub issuer: &'static str,
    /// Allowed future drift of a token's `iat`
    pub clock_skew: Duration,
}

impl AuthConfig {
    pub fn new(session_secret: SigningSecret, expected_origin: impl Into<String>) -> Self {
        Self {
            session_secret,
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_secure: true,
            expected_origin: expected_origin.into(),
            issuer: SESSION_ISSUER,
            clock_skew: DEFAULT_CLOCK_SKEW,
        }
    }

    /// Read `SESSION_SECRET`, `SESSION_TTL_SECS`, `COOKIE_SECURE` and `APP_ORIGIN`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;
        if secret.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                length = secret.len(),
                recommended = RECOMMENDED_SECRET_LEN,
                "SESSION_SECRET is shorter than recommended"
            );
        }

        let expected_origin = match lookup("APP_ORIGIN") {
            Some(origin) if !origin.is_empty() => origin,
            _ => {
                tracing::warn!(origin = DEFAULT_ORIGIN, "APP_ORIGIN not set, using default");
                DEFAULT_ORIGIN.to_string()
            }
        };

        let mut config = Self::new(SigningSecret::new(secret.into_bytes()), expected_origin);

        if let Some(raw) = lookup("SESSION_TTL_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "SESSION_TTL_SECS",
                reason: format!("{raw:?} is not a whole number of seconds"),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    name: "SESSION_TTL_SECS",
                    reason: "must be greater than zero".to_string(),
                });
            }
            if secs > MAX_SESSION_TTL.as_secs() {
                return Err(ConfigError::InvalidValue {
                    name: "SESSION_TTL_SECS",
                    reason: format!("must be at most {} seconds", MAX_SESSION_TTL.as_secs()),
                });
            }
            config.session_ttl = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("COOKIE_SECURE") {
            config.cookie_secure = parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                name: "COOKIE_SECURE",
                reason: format!("{raw:?} is not a boolean"),
            })?;
        }

        Ok(config)
    }

    /// Random secret and insecure cookie, for local runs and tests
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::new(SigningSecret::random(), DEFAULT_ORIGIN)
        }
    }

    /// Session TTL as a signed chrono duration
    pub fn session_ttl_chrono(&self) -> AuthResult<chrono::Duration> {
        chrono::Duration::from_std(self.session_ttl)
            .map_err(|_| AuthError::Internal("Session TTL out of range".to_string()))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
