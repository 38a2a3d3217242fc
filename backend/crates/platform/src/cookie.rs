//! Cookie Management Infrastructure
//!
//! Builds `Set-Cookie` values and reads cookies back out of request headers.

use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Duration, Utc};

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by every cookie a given name is written with
#[derive(Debug, Clone)]
pub struct CookieSpec {
    pub name: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl CookieSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: "/".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
        }
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Cookie storing `value` for `ttl`, counted from `now`
    ///
    /// Carries both `Max-Age` and `Expires` so agents that ignore
    /// `Max-Age` still drop it on time.
    pub fn set(&self, value: impl Into<String>, ttl: Duration, now: DateTime<Utc>) -> SetCookie {
        SetCookie {
            spec: self.clone(),
            value: value.into(),
            max_age_secs: ttl.num_seconds(),
            expires: now
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Cookie that makes the agent discard any stored value under this name
    pub fn removal(&self) -> SetCookie {
        SetCookie {
            spec: self.clone(),
            value: String::new(),
            max_age_secs: 0,
            expires: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// One `Set-Cookie` instruction
#[derive(Debug, Clone)]
pub struct SetCookie {
    pub spec: CookieSpec,
    pub value: String,
    pub max_age_secs: i64,
    pub expires: DateTime<Utc>,
}

impl SetCookie {
    /// Render as a `Set-Cookie` header value
    pub fn render(&self) -> String {
        let spec = &self.spec;
        let mut cookie = format!("{}={}; Path={}", spec.name, self.value, spec.path);
        cookie.push_str(&format!("; Max-Age={}", self.max_age_secs));
        cookie.push_str(&format!("; Expires={}", http_date(self.expires)));
        if spec.http_only {
            cookie.push_str("; HttpOnly");
        }
        if spec.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", spec.same_site.as_str()));
        cookie
    }

    pub fn to_header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.render())
    }
}

/// Format a timestamp as an HTTP date
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// Extract a cookie value from headers
///
/// Looks through every `Cookie` header; the first pair whose name matches wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
}
