//! Users

pub mod records;
mod requester;

pub use records::{Role, UserRecord, UserUuid};
pub use requester::Requester;
