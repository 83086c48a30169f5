//! Auth service errors.

use argon2::password_hash;
use sqlx::Error;
use thiserror::Error;

use crate::{auth::SessionTokenError, database::Failure};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid or expired session")]
    Unauthenticated,

    #[error("an account with this email already exists")]
    AlreadyExists,

    #[error("{0} is required")]
    BlankField(&'static str),

    #[error("please enter a valid email")]
    InvalidEmail,

    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("invalid data")]
    InvalidData,

    #[error("password hashing failed")]
    PasswordHash(#[source] password_hash::Error),

    #[error("session expiry out of range")]
    Expiry(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] SessionTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match Failure::of(&error) {
            Failure::Duplicate => Self::AlreadyExists,
            Failure::NullColumn | Failure::CheckFailed => Self::InvalidData,
            Failure::NoRows | Failure::DanglingReference | Failure::Other => Self::Sql(error),
        }
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}

impl From<password_hash::Error> for AuthServiceError {
    fn from(error: password_hash::Error) -> Self {
        Self::PasswordHash(error)
    }
}
