//! Sign In Use Case
//!
//! Checks an email/password pair and issues a session token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::application::validate_input::{IdentityInput, ValidationScenario, validate_input};
use crate::domain::repository::UserStore;
use crate::domain::value_object::credential::Credential;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed token for the session cookie
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserStore,
{
    user_store: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_store, config }
    }

    /// Unknown email, wrong password and inactive account all end in
    /// `AuthError::InvalidCredential`, after the same amount of hashing work.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let identity = IdentityInput {
            email: &input.email,
            ..IdentityInput::default()
        };
        let validated = validate_input(ValidationScenario::Login, &identity)?;

        let record = self.user_store.find_by_email(validated.email()).await?;

        let candidate = ClearTextPassword::for_verification(input.password);
        let credential = record.as_ref().map(|r| r.credential.clone());
        let password_ok = tokio::task::spawn_blocking(move || {
            Credential::verify_or_dummy(credential.as_ref(), &candidate)
        })
        .await?;

        let user = match record {
            Some(user) if password_ok && user.active => user,
            Some(user) if password_ok => {
                tracing::warn!(user_id = %user.user_id, "Sign in refused for inactive account");
                return Err(AuthError::InvalidCredential);
            }
            _ => return Err(AuthError::InvalidCredential),
        };

        let session_token = session_token::issue(
            user.user_id,
            self.config.session_secret.as_bytes(),
            self.config.session_ttl_chrono()?,
        )?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { session_token })
    }
}
