//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::config::AuthConfig;
use crate::application::session_cookie::make_session_cookie;
use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::UserStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginForm, RegisterForm, SessionResponse};
use crate::presentation::middleware::{AuthenticatedUser, redirect_clearing_session};

pub const REGISTERED_LOCATION: &str = "/login.html?created=1";
pub const SIGNED_IN_LOCATION: &str = "/main";
pub const SIGNED_OUT_LOCATION: &str = "/?session=logout";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<U>
where
    U: UserStore + Clone + Send + Sync + 'static,
{
    pub user_store: Arc<U>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<U>(
    State(state): State<AuthAppState<U>>,
    Form(form): Form<RegisterForm>,
) -> AuthResult<Response>
where
    U: UserStore + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.user_store.clone());

    use_case
        .execute(SignUpInput {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
        })
        .await?;

    Ok(Redirect::to(REGISTERED_LOCATION).into_response())
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<U>(
    State(state): State<AuthAppState<U>>,
    Form(form): Form<LoginForm>,
) -> AuthResult<Response>
where
    U: UserStore + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.user_store.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: form.email,
            password: form.password,
        })
        .await?;

    let cookie = make_session_cookie(
        &output.session_token,
        state.config.session_ttl_chrono()?,
        state.config.cookie_secure,
    )
    .to_header_value()
    .map_err(|e| AuthError::Internal(format!("Session cookie not encodable: {e}")))?;

    let redirect = Redirect::to(SIGNED_IN_LOCATION);
    Ok(([(header::SET_COOKIE, cookie)], redirect).into_response())
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
pub async fn logout<U>(
    State(state): State<AuthAppState<U>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Response
where
    U: UserStore + Clone + Send + Sync + 'static,
{
    tracing::info!(user_id = %user_id, "User signed out");
    redirect_clearing_session(SIGNED_OUT_LOCATION, state.config.cookie_secure)
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /session
pub async fn session_status(
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: user_id.to_string(),
    })
}
