//! Contact Errors

use salvo::http::StatusError;
use tracing::warn;

use kusuri_app::domain::contact::ContactServiceError;

pub(crate) fn into_status_error(error: ContactServiceError) -> StatusError {
    match error {
        error @ (ContactServiceError::BlankField(_) | ContactServiceError::InvalidEmail) => {
            StatusError::bad_request().brief(error.to_string())
        }
        ContactServiceError::Forbidden => StatusError::forbidden().brief("Admin access required"),
        ContactServiceError::Delivery(source) => {
            warn!("test notification failed: {source}");

            StatusError::bad_gateway().brief(source.to_string())
        }
    }
}
