//! Feedback Records

use jiff::Timestamp;

use crate::{domain::users::UserUuid, uuids::TypedUuid};

/// Feedback UUID
pub type FeedbackUuid = TypedUuid<FeedbackRecord>;

/// Feedback Record
///
/// Name and email are copied from the submitting account, so they survive its deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub uuid: FeedbackUuid,
    pub user_uuid: Option<UserUuid>,
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub message: String,
    pub created_at: Timestamp,
}

/// Aggregate ratings across all feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeedbackStats {
    /// Mean rating, `0.0` when there is no feedback.
    pub average_rating: f64,
    pub total: u64,
    pub five_star: u64,
    pub four_star: u64,
    pub three_star: u64,
    pub two_star: u64,
    pub one_star: u64,
}
