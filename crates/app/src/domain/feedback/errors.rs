//! Feedback service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::Failure;

#[derive(Debug, Error)]
pub enum FeedbackServiceError {
    #[error("rating must be between 1 and 5")]
    InvalidRating,

    #[error("message is required")]
    EmptyMessage,

    #[error("feedback not found")]
    NotFound,

    #[error("admin access required")]
    Forbidden,

    #[error("feedback already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for FeedbackServiceError {
    fn from(error: Error) -> Self {
        match Failure::of(&error) {
            Failure::NoRows => Self::NotFound,
            Failure::Duplicate => Self::AlreadyExists,
            Failure::NullColumn | Failure::CheckFailed => Self::InvalidData,
            Failure::DanglingReference | Failure::Other => Self::Sql(error),
        }
    }
}
