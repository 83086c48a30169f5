//! Kusuri Domain Concerns

use thiserror::Error;

pub mod contact;
pub mod feedback;
pub mod orders;
pub mod products;
pub mod users;
pub mod validation;

/// A stored or submitted value that doesn't name a member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
