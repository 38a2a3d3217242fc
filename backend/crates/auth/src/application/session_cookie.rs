//! Session Cookie Factory
//!
//! `sl_auth` cookies: `Path=/`, `HttpOnly`, `SameSite=Lax`, `Secure` per config.

use chrono::Utc;
use platform::cookie::{CookieSpec, SetCookie};

use crate::application::config::SESSION_COOKIE_NAME;

fn session_cookie_spec(secure: bool) -> CookieSpec {
    CookieSpec::new(SESSION_COOKIE_NAME).secure(secure)
}

/// Cookie carrying `token` for `ttl`
pub fn make_session_cookie(token: &str, ttl: chrono::Duration, secure: bool) -> SetCookie {
    session_cookie_spec(secure).set(token, ttl, Utc::now())
}

/// Cookie that supersedes and deletes a session cookie
pub fn make_clear_cookie(secure: bool) -> SetCookie {
    session_cookie_spec(secure).removal()
}
