//! Contact service errors.

use thiserror::Error;

use crate::notifications::NotifierError;

#[derive(Debug, Error)]
pub enum ContactServiceError {
    #[error("{0} is required")]
    BlankField(&'static str),

    #[error("please enter a valid email")]
    InvalidEmail,

    #[error("admin access required")]
    Forbidden,

    #[error("notification delivery failed")]
    Delivery(#[from] NotifierError),
}
