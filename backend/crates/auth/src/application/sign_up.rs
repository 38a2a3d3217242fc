//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::validate_input::{
    IdentityInput, ValidatedInput, ValidationScenario, validate_input,
};
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserStore;
use crate::domain::value_object::{credential::Credential, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserStore,
{
    user_store: Arc<U>,
}

impl<U> SignUpUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: Arc<U>) -> Self {
        Self { user_store }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let identity = IdentityInput {
            first_name: &input.first_name,
            last_name: &input.last_name,
            email: &input.email,
        };
        let fields = match validate_input(ValidationScenario::SignUp, &identity)? {
            ValidatedInput::SignUp(fields) => fields,
            ValidatedInput::Login(_) => {
                return Err(AuthError::Internal("Unexpected login fields".to_string()));
            }
        };

        // Argon2 is deliberately slow; keep it off the async workers
        let password = input.password;
        let credential = tokio::task::spawn_blocking(move || Credential::hash(password)).await??;

        let user = NewUser::new(
            fields.first_name,
            fields.last_name,
            fields.email,
            credential,
        );
        let user_id = self.user_store.create(&user).await?;

        tracing::info!(user_id = %user_id, "User signed up");

        Ok(SignUpOutput { user_id })
    }
}
