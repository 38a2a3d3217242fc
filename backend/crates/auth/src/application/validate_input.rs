//! Identity input validation, per scenario.

use crate::domain::value_object::{
    email::Email,
    person_name::{self, PersonName},
};
use crate::error::AuthResult;

/// Which fields a form carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationScenario {
    /// First name, last name and email
    SignUp,
    /// Email only
    Login,
}

/// Raw identity fields as submitted
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpFields {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFields {
    pub email: Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedInput {
    SignUp(SignUpFields),
    Login(LoginFields),
}

impl ValidatedInput {
    /// Empty for the login scenario
    pub fn first_name(&self) -> &str {
        match self {
            ValidatedInput::SignUp(fields) => fields.first_name.as_str(),
            ValidatedInput::Login(_) => "",
        }
    }

    /// Empty for the login scenario
    pub fn last_name(&self) -> &str {
        match self {
            ValidatedInput::SignUp(fields) => fields.last_name.as_str(),
            ValidatedInput::Login(_) => "",
        }
    }

    pub fn email(&self) -> &Email {
        match self {
            ValidatedInput::SignUp(fields) => &fields.email,
            ValidatedInput::Login(fields) => &fields.email,
        }
    }
}

pub fn validate_input(
    scenario: ValidationScenario,
    input: &IdentityInput<'_>,
) -> AuthResult<ValidatedInput> {
    match scenario {
        ValidationScenario::SignUp => validate_sign_up(input).map(ValidatedInput::SignUp),
        ValidationScenario::Login => validate_login(input.email).map(ValidatedInput::Login),
    }
}

/// Names are checked for length and control characters before shape,
/// so an over-long name is reported as such even if it is also malformed.
fn validate_sign_up(input: &IdentityInput<'_>) -> AuthResult<SignUpFields> {
    let first_name = person_name::normalize(input.first_name)?;
    let last_name = person_name::normalize(input.last_name)?;

    let first_name = PersonName::from_normalized(first_name)?;
    let last_name = PersonName::from_normalized(last_name)?;

    let email = Email::parse(input.email)?;

    Ok(SignUpFields {
        first_name,
        last_name,
        email,
    })
}

fn validate_login(email: &str) -> AuthResult<LoginFields> {
    Ok(LoginFields {
        email: Email::parse(email)?,
    })
}
