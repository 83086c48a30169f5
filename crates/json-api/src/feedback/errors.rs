//! Feedback Errors

use salvo::http::StatusError;
use tracing::error;

use kusuri_app::domain::feedback::FeedbackServiceError;

pub(crate) fn into_status_error(error: FeedbackServiceError) -> StatusError {
    match error {
        error @ (FeedbackServiceError::InvalidRating | FeedbackServiceError::EmptyMessage) => {
            StatusError::bad_request().brief(error.to_string())
        }
        FeedbackServiceError::InvalidData => StatusError::bad_request().brief("Invalid feedback"),
        FeedbackServiceError::NotFound => StatusError::not_found().brief("Feedback not found"),
        FeedbackServiceError::Forbidden => StatusError::forbidden().brief("Admin access required"),
        FeedbackServiceError::AlreadyExists => {
            StatusError::conflict().brief("Feedback already exists")
        }
        FeedbackServiceError::Sql(source) => {
            error!("feedback storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
