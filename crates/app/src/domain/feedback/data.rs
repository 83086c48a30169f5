//! Feedback Data

use crate::domain::feedback::records::FeedbackUuid;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// New Feedback Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub uuid: FeedbackUuid,
    pub rating: u8,
    pub message: String,
}
