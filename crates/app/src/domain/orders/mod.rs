//! Orders
//!
//! Checkout turns a client-held cart into a persisted order with snapshot pricing; after
//! that only an admin can move its status or delete it.

pub mod checkout;
pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
