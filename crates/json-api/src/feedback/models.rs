//! Feedback response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kusuri_app::domain::feedback::records::{FeedbackRecord, FeedbackStats};

/// Feedback Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedbackResponse {
    pub id: Uuid,

    /// Absent once the submitting account is gone
    pub user: Option<Uuid>,

    pub name: String,
    pub email: String,
    pub rating: u8,
    pub message: String,
    pub created_at: String,
}

impl From<FeedbackRecord> for FeedbackResponse {
    fn from(feedback: FeedbackRecord) -> Self {
        Self {
            id: feedback.uuid.into(),
            user: feedback.user_uuid.map(Into::into),
            name: feedback.name,
            email: feedback.email,
            rating: feedback.rating,
            message: feedback.message,
            created_at: feedback.created_at.to_string(),
        }
    }
}

/// Per-star counts, highest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingDistribution {
    #[serde(rename = "5")]
    pub five: u64,
    #[serde(rename = "4")]
    pub four: u64,
    #[serde(rename = "3")]
    pub three: u64,
    #[serde(rename = "2")]
    pub two: u64,
    #[serde(rename = "1")]
    pub one: u64,
}

/// Feedback Stats Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedbackStatsResponse {
    pub success: bool,

    /// Mean rating rounded to one decimal place
    pub average_rating: f64,

    pub total_feedback: u64,
    pub rating_distribution: RatingDistribution,
}

impl From<FeedbackStats> for FeedbackStatsResponse {
    fn from(stats: FeedbackStats) -> Self {
        Self {
            success: true,
            average_rating: (stats.average_rating * 10.0).round() / 10.0,
            total_feedback: stats.total,
            rating_distribution: RatingDistribution {
                five: stats.five_star,
                four: stats.four_star,
                three: stats.three_star,
                two: stats.two_star,
                one: stats.one_star,
            },
        }
    }
}
