//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use kusuri_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::Unauthenticated => {
            StatusError::unauthorized().brief("Invalid or expired session")
        }
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        error @ (AuthServiceError::BlankField(_)
        | AuthServiceError::InvalidEmail
        | AuthServiceError::WeakPassword { .. }) => {
            StatusError::bad_request().brief(error.to_string())
        }
        AuthServiceError::InvalidData => StatusError::bad_request().brief("Invalid account data"),
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::PasswordHash(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Expiry(source) => {
            error!("failed to compute session expiry: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
