//! Request Guards
//!
//! - Session guard: `sl_auth` cookie → verified [`AuthenticatedUser`], or a
//!   clear-cookie redirect to `/?session=expired`.
//! - API guard: exact `Origin` match, then the required `Content-Type`.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use mime::Mime;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::application::session_cookie::make_clear_cookie;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

/// Where a failed session check sends the browser
pub const SESSION_EXPIRED_LOCATION: &str = "/?session=expired";

/// Verified subject, placed in request extensions by [`require_session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Body encoding an API route insists on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredMediaType {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
}

impl RequiredMediaType {
    pub fn mime(&self) -> Mime {
        match self {
            RequiredMediaType::Json => mime::APPLICATION_JSON,
            RequiredMediaType::Form => mime::APPLICATION_WWW_FORM_URLENCODED,
        }
    }
}

/// State for [`require_api_contract`]
#[derive(Clone)]
pub struct ApiGuard {
    pub config: Arc<AuthConfig>,
    pub media: RequiredMediaType,
}

/// Session guard middleware
///
/// A missing cookie and an invalid token produce byte-identical responses.
pub async fn require_session(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let use_case = CheckSessionUseCase::new(config.clone());

    match use_case.execute(req.headers()) {
        Ok(user_id) => {
            req.extensions_mut().insert(AuthenticatedUser(user_id));
            next.run(req).await
        }
        Err(_) => {
            tracing::debug!(path = %req.uri().path(), "Session check failed, redirecting");
            expired_session_response(config.cookie_secure)
        }
    }
}

/// API guard middleware
pub async fn require_api_contract(
    State(guard): State<ApiGuard>,
    req: Request,
    next: Next,
) -> Response {
    if let Err(err) = check_api_contract(req.headers(), &guard) {
        tracing::debug!(path = %req.uri().path(), error = %err, "API contract rejected");
        return err.into_response();
    }
    next.run(req).await
}

/// Origin first, then media type
pub fn check_api_contract(headers: &HeaderMap, guard: &ApiGuard) -> Result<(), AuthError> {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());
    if origin != Some(guard.config.expected_origin.as_str()) {
        return Err(AuthError::ForbiddenOrigin);
    }

    if !platform::media_type::content_type_matches(headers, &guard.media.mime()) {
        return Err(AuthError::UnsupportedMediaType);
    }

    Ok(())
}

/// `303 See Other` to the landing page with a clearing cookie
pub fn expired_session_response(cookie_secure: bool) -> Response {
    redirect_clearing_session(SESSION_EXPIRED_LOCATION, cookie_secure)
}

pub(crate) fn redirect_clearing_session(location: &str, cookie_secure: bool) -> Response {
    let clear = make_clear_cookie(cookie_secure).render();
    ([(header::SET_COOKIE, clear)], Redirect::to(location)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn guard(media: RequiredMediaType) -> ApiGuard {
        ApiGuard {
            config: Arc::new(AuthConfig::development()),
            media,
        }
    }

    fn headers(origin: Option<&'static str>, content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(origin) = origin {
            headers.insert(header::ORIGIN, HeaderValue::from_static(origin));
        }
        if let Some(content_type) = content_type {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        headers
    }

    #[test]
    fn test_contract_satisfied() {
        let h = headers(
            Some("http://localhost:8888"),
            Some("application/json; charset=utf-8"),
        );
        assert!(check_api_contract(&h, &guard(RequiredMediaType::Json)).is_ok());
    }

    #[test]
    fn test_missing_origin() {
        let h = headers(None, Some("application/json"));
        assert!(matches!(
            check_api_contract(&h, &guard(RequiredMediaType::Json)),
            Err(AuthError::ForbiddenOrigin)
        ));
    }

    #[test]
    fn test_origin_must_match_exactly() {
        for origin in [
            "http://localhost:8888/",
            "https://localhost:8888",
            "http://localhost:8889",
            "http://LOCALHOST:8888",
        ] {
            let h = headers(Some(origin), Some("application/json"));
            assert!(
                matches!(
                    check_api_contract(&h, &guard(RequiredMediaType::Json)),
                    Err(AuthError::ForbiddenOrigin)
                ),
                "{origin} accepted"
            );
        }
    }

    #[test]
    fn test_origin_checked_before_media_type() {
        let h = headers(Some("http://evil.example"), Some("text/plain"));
        assert!(matches!(
            check_api_contract(&h, &guard(RequiredMediaType::Json)),
            Err(AuthError::ForbiddenOrigin)
        ));
    }

    #[test]
    fn test_wrong_media_type() {
        let h = headers(Some("http://localhost:8888"), Some("application/json"));
        assert!(matches!(
            check_api_contract(&h, &guard(RequiredMediaType::Form)),
            Err(AuthError::UnsupportedMediaType)
        ));
    }

    #[test]
    fn test_missing_media_type() {
        let h = headers(Some("http://localhost:8888"), None);
        assert!(matches!(
            check_api_contract(&h, &guard(RequiredMediaType::Form)),
            Err(AuthError::UnsupportedMediaType)
        ));
    }

    #[test]
    fn test_expired_session_response() {
        let response = expired_session_response(true);
        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/?session=expired"
        );
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("sl_auth=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
