//! Contact relay and notification checks

mod errors;
pub(crate) mod handlers;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
