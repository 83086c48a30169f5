//! Contact relay
//!
//! Inquiries are not stored; they are validated and forwarded to the admin.

mod errors;
mod service;

pub use errors::ContactServiceError;
pub use service::*;

/// A contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}
