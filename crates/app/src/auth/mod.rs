//! Authentication
//!
//! Customers and admins sign in with email and password and receive an opaque bearer
//! token backed by a row in `sessions`.

mod errors;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
