//! Router-level flows: guards, handlers and stores wired together.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum::routing::post;
use serde_json::Value;
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::infra::memory::InMemoryUserStore;
use crate::presentation::middleware::{AuthenticatedUser, RequiredMediaType};
use crate::presentation::router::{auth_router_generic, with_api_guard, with_session_guard};

const ORIGIN: &str = "http://localhost:8888";
const FORM: &str = "application/x-www-form-urlencoded";
const ANN: &str = "firstName=Ann&lastName=Lee&email=ann%40example.com&password=correct+horse";

struct TestApp {
    router: Router,
    store: InMemoryUserStore,
    config: Arc<AuthConfig>,
}

impl TestApp {
    fn new() -> Self {
        let config = Arc::new(AuthConfig::development());
        let store = InMemoryUserStore::new();
        let router = auth_router_generic(store.clone(), config.clone());
        Self {
            router,
            store,
            config,
        }
    }

    async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    async fn register(&self, body: &str) -> Response {
        self.send(form_post("/register", body)).await
    }

    async fn login(&self, email: &str, password: &str) -> Response {
        let body = format!(
            "email={}&password={}",
            email.replace('@', "%40"),
            password.replace(' ', "+")
        );
        self.send(form_post("/login", &body)).await
    }

    /// Register Ann and return their session cookie pair (`sl_auth=...`)
    async fn signed_in(&self) -> String {
        assert_eq!(self.register(ANN).await.status(), StatusCode::SEE_OTHER);
        let response = self.login("ann@example.com", "correct horse").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        cookie_pair(&response)
    }

    fn token_for(&self, user_id: UserId, ttl: chrono::Duration) -> String {
        session_token::issue(user_id, self.config.session_secret.as_bytes(), ttl).unwrap()
    }
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::ORIGIN, ORIGIN)
        .header(header::CONTENT_TYPE, FORM)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

/// `name=value` part of the response's Set-Cookie
fn cookie_pair(response: &Response) -> String {
    set_cookie(response)
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn test_register_redirects_to_login() {
    let app = TestApp::new();
    let response = app.register(ANN).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login.html?created=1");
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register(ANN).await;
    let response = app.register(ANN).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "This email address is already in use");
}

#[tokio::test]
async fn test_register_weak_password() {
    let app = TestApp::new();
    let response = app
        .register("firstName=Ann&lastName=Lee&email=ann%40example.com&password=short")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_register_invalid_name_message() {
    let app = TestApp::new();
    let response = app
        .register("firstName=Eve%21&lastName=Lee&email=eve%40example.com&password=correct+horse")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["detail"],
        "First/last names can only contain letters with single spaces or hyphens between parts"
    );
}

#[tokio::test]
async fn test_register_missing_fields_fail_validation() {
    let app = TestApp::new();
    let response = app.register("email=ann%40example.com").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_stores_address_only() {
    let app = TestApp::new();
    let body = concat!(
        "firstName=Bob&lastName=Lee",
        "&email=Bob+%3Cbob%40example.com%3E",
        "&password=correct+horse"
    );
    let response = app.register(body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.login("bob@example.com", "correct horse").await;
    assert_eq!(location(&response), "/main");
}

#[tokio::test]
async fn test_register_requires_origin() {
    let app = TestApp::new();
    let req = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, FORM)
        .body(Body::from(ANN))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_register_rejects_json_body() {
    let app = TestApp::new();
    let req = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::ORIGIN, ORIGIN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    assert_eq!(
        app.send(req).await.status(),
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
}

#[tokio::test]
async fn test_oversized_form_is_rejected() {
    let app = TestApp::new();
    let body = format!("{ANN}&padding={}", "x".repeat(5000));
    let response = app.register(&body).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.store.is_empty().await);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new();
    app.register(ANN).await;
    let response = app.login("ann@example.com", "correct horse").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/main");

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("sl_auth="));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=7200"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    // development config
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register(ANN).await;

    let wrong_password = app.login("ann@example.com", "wrong horse").await;
    let unknown_email = app.login("nobody@example.com", "correct horse").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong_password.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(
        body_bytes(wrong_password).await,
        body_bytes(unknown_email).await
    );
}

#[tokio::test]
async fn test_login_inactive_account() {
    let app = TestApp::new();
    app.register(ANN).await;
    app.store
        .deactivate(&Email::parse("ann@example.com").unwrap())
        .await;

    let response = app.login("ann@example.com", "correct horse").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_invalid_email_is_validation_error() {
    let app = TestApp::new();
    let response = app.login("not-an-email", "correct horse").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Session guard
// ============================================================================

#[tokio::test]
async fn test_session_returns_subject() {
    let app = TestApp::new();
    let cookie = app.signed_in().await;

    let response = app.send(get("/session", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let user_id: UserId = body["userId"].as_str().unwrap().parse().unwrap();
    let token = cookie.trim_start_matches("sl_auth=");
    assert_eq!(
        session_token::validate(token, app.config.session_secret.as_bytes()).unwrap(),
        user_id
    );
}

#[tokio::test]
async fn test_missing_and_invalid_cookie_look_the_same() {
    let app = TestApp::new();
    let missing = app.send(get("/session", None)).await;
    let invalid = app.send(get("/session", Some("sl_auth=garbage"))).await;

    for response in [&missing, &invalid] {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(response), "/?session=expired");
        assert!(set_cookie(response).starts_with("sl_auth=;"));
    }
    assert_eq!(set_cookie(&missing), set_cookie(&invalid));
    assert_eq!(body_bytes(missing).await, body_bytes(invalid).await);
}

#[tokio::test]
async fn test_expired_cookie_redirects() {
    let app = TestApp::new();
    let token = app.token_for(UserId::new(), chrono::Duration::seconds(-5));
    let response = app
        .send(get("/session", Some(&format!("sl_auth={token}"))))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?session=expired");
}

#[tokio::test]
async fn test_cookie_from_other_deployment_redirects() {
    let app = TestApp::new();
    let other = TestApp::new();
    let cookie = other.signed_in().await;

    let response = app.send(get("/session", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    let cookie = app.signed_in().await;

    let response = app.send(get("/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?session=logout");

    let cleared = set_cookie(&response);
    assert!(cleared.starts_with("sl_auth=;"));
    assert!(cleared.contains("Max-Age=0"));
    assert!(cleared.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
}

// ============================================================================
// Guard composition on a host route
// ============================================================================

async fn echo_user(AuthenticatedUser(user_id): AuthenticatedUser) -> String {
    user_id.to_string()
}

fn host_router(config: Arc<AuthConfig>) -> Router {
    let router = Router::new().route("/api/lists", post(echo_user));
    let router = with_api_guard(router, config.clone(), RequiredMediaType::Json);
    with_session_guard(router, config)
}

fn json_post(cookie: Option<&str>, origin: Option<&str>, content_type: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/lists")
        .header(header::CONTENT_TYPE, content_type);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }
    builder.body(Body::from("{}")).unwrap()
}

#[tokio::test]
async fn test_session_guard_runs_before_api_guard() {
    let config = Arc::new(AuthConfig::development());
    let response = host_router(config)
        .oneshot(json_post(None, Some("http://evil.example"), "text/plain"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?session=expired");
}

#[tokio::test]
async fn test_api_guard_rejections_after_session() {
    let app = TestApp::new();
    let user_id = UserId::new();
    let token = app.token_for(user_id, chrono::Duration::hours(1));
    let cookie = format!("sl_auth={token}");
    let router = host_router(app.config.clone());

    let bad_origin = router
        .clone()
        .oneshot(json_post(
            Some(&cookie),
            Some("http://evil.example"),
            "application/json",
        ))
        .await
        .unwrap();
    assert_eq!(bad_origin.status(), StatusCode::FORBIDDEN);

    let no_origin = router
        .clone()
        .oneshot(json_post(Some(&cookie), None, "application/json"))
        .await
        .unwrap();
    assert_eq!(no_origin.status(), StatusCode::FORBIDDEN);

    let bad_type = router
        .clone()
        .oneshot(json_post(Some(&cookie), Some(ORIGIN), FORM))
        .await
        .unwrap();
    assert_eq!(bad_type.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_guarded_handler_sees_subject() {
    let app = TestApp::new();
    let user_id = UserId::new();
    let token = app.token_for(user_id, chrono::Duration::hours(1));
    let cookie = format!("sl_auth={token}");

    let response = host_router(app.config.clone())
        .oneshot(json_post(
            Some(&cookie),
            Some(ORIGIN),
            "application/json; charset=utf-8",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, user_id.to_string().into_bytes());
}

// ============================================================================
// Full flow
// ============================================================================

#[tokio::test]
async fn test_register_login_session_logout() {
    let app = TestApp::new();
    let cookie = app.signed_in().await;

    assert_eq!(
        app.send(get("/session", Some(&cookie))).await.status(),
        StatusCode::OK
    );

    let logout = app.send(get("/logout", Some(&cookie))).await;
    let cleared = cookie_pair(&logout);
    assert_eq!(cleared, "sl_auth=");

    // The browser now sends the emptied cookie
    let after = app.send(get("/session", Some(&cleared))).await;
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&after), "/?session=expired");
}
