//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{database::Failure, domain::products::records::ProductUuid};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid total")]
    InvalidTotal,

    #[error("item quantity must be at least 1")]
    InvalidQuantity,

    #[error("declared total {declared} does not match the items total {computed}")]
    TotalMismatch { declared: u64, computed: u64 },

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("order not found")]
    NotFound,

    #[error("access denied")]
    Forbidden,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match Failure::of(&error) {
            Failure::NoRows => Self::NotFound,
            Failure::Duplicate => Self::AlreadyExists,
            Failure::DanglingReference => Self::InvalidReference,
            Failure::NullColumn => Self::MissingRequiredData,
            Failure::CheckFailed => Self::InvalidData,
            Failure::Other => Self::Sql(error),
        }
    }
}
