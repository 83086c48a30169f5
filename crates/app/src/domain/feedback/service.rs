//! Feedback service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        feedback::{
            data::{MAX_RATING, MIN_RATING, NewFeedback},
            errors::FeedbackServiceError,
            records::{FeedbackRecord, FeedbackStats, FeedbackUuid},
            repository::PgFeedbackRepository,
        },
        users::Requester,
        validation::non_blank,
    },
};

#[derive(Debug, Clone)]
pub struct PgFeedbackService {
    db: Db,
    repository: PgFeedbackRepository,
}

impl PgFeedbackService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgFeedbackRepository::new(),
        }
    }
}

fn ensure_admin(requester: &Requester) -> Result<(), FeedbackServiceError> {
    if requester.is_admin() {
        Ok(())
    } else {
        Err(FeedbackServiceError::Forbidden)
    }
}

#[async_trait]
impl FeedbackService for PgFeedbackService {
    async fn submit_feedback(
        &self,
        requester: &Requester,
        feedback: NewFeedback,
    ) -> Result<FeedbackRecord, FeedbackServiceError> {
        if !(MIN_RATING..=MAX_RATING).contains(&feedback.rating) {
            return Err(FeedbackServiceError::InvalidRating);
        }

        let message = non_blank(&feedback.message).ok_or(FeedbackServiceError::EmptyMessage)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_feedback(&mut tx, feedback.uuid, requester, feedback.rating, &message)
            .await?;

        tx.commit().await?;

        tracing::info!(
            feedback_uuid = %created.uuid,
            rating = created.rating,
            "feedback submitted"
        );

        Ok(created)
    }

    async fn list_feedback(
        &self,
        requester: &Requester,
    ) -> Result<Vec<FeedbackRecord>, FeedbackServiceError> {
        ensure_admin(requester)?;

        let mut tx = self.db.begin().await?;

        let feedback = self.repository.list_feedback(&mut tx).await?;

        tx.commit().await?;

        Ok(feedback)
    }

    async fn feedback_stats(
        &self,
        requester: &Requester,
    ) -> Result<FeedbackStats, FeedbackServiceError> {
        ensure_admin(requester)?;

        let mut tx = self.db.begin().await?;

        let stats = self.repository.feedback_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }

    async fn delete_feedback(
        &self,
        requester: &Requester,
        feedback: FeedbackUuid,
    ) -> Result<(), FeedbackServiceError> {
        ensure_admin(requester)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_feedback(&mut tx, feedback).await?;

        if rows_affected == 0 {
            return Err(FeedbackServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Record feedback from any signed-in user.
    async fn submit_feedback(
        &self,
        requester: &Requester,
        feedback: NewFeedback,
    ) -> Result<FeedbackRecord, FeedbackServiceError>;

    /// All feedback, newest first. Admin only.
    async fn list_feedback(
        &self,
        requester: &Requester,
    ) -> Result<Vec<FeedbackRecord>, FeedbackServiceError>;

    /// Rating aggregates. Admin only.
    async fn feedback_stats(
        &self,
        requester: &Requester,
    ) -> Result<FeedbackStats, FeedbackServiceError>;

    /// Delete a feedback entry. Admin only.
    async fn delete_feedback(
        &self,
        requester: &Requester,
        feedback: FeedbackUuid,
    ) -> Result<(), FeedbackServiceError>;
}
