//! Auth Router

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserStore;
use crate::infra::postgres::PgUserStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{
    ApiGuard, RequiredMediaType, require_api_contract, require_session,
};

/// Largest accepted form body
pub const FORM_BODY_LIMIT: usize = 4 * 1024;

/// Create the Auth router with the PostgreSQL user store
pub fn auth_router(store: PgUserStore, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(store, config)
}

/// Create the Auth router for any user store
///
/// - `POST /register`, `POST /login`: API guard (form bodies)
/// - `GET /logout`, `GET /session`: session guard
pub fn auth_router_generic<U>(store: U, config: Arc<AuthConfig>) -> Router
where
    U: UserStore + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        user_store: Arc::new(store),
        config: config.clone(),
    };

    let forms = Router::new()
        .route("/register", post(handlers::register::<U>))
        .route("/login", post(handlers::login::<U>));
    let forms = with_api_guard(forms, config.clone(), RequiredMediaType::Form);

    let session = Router::new()
        .route("/logout", get(handlers::logout::<U>))
        .route("/session", get(handlers::session_status));
    let session = with_session_guard(session, config);

    forms
        .merge(session)
        .layer(DefaultBodyLimit::max(FORM_BODY_LIMIT))
        .with_state(state)
}

/// Require a valid session on every route currently in `router`
///
/// Apply after [`with_api_guard`] so the session check runs first.
pub fn with_session_guard<S>(router: Router<S>, config: Arc<AuthConfig>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(config, require_session))
}

/// Require the configured origin and `media` body type on every route currently in `router`
pub fn with_api_guard<S>(
    router: Router<S>,
    config: Arc<AuthConfig>,
    media: RequiredMediaType,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        ApiGuard { config, media },
        require_api_contract,
    ))
}
