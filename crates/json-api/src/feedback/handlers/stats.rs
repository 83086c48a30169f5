//! Feedback Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    feedback::{FeedbackStatsResponse, into_status_error},
    state::State,
};

/// Feedback Stats Handler
#[endpoint(
    tags("feedback"),
    summary = "Feedback Stats",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Rating aggregates"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FeedbackStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;

    let stats = state
        .app
        .feedback
        .feedback_stats(requester)
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use kusuri_app::domain::feedback::{MockFeedbackService, records::FeedbackStats};

    use crate::test_helpers::{Mocks, admin, as_requester};

    use super::*;

    fn make_service(feedback: MockFeedbackService) -> Service {
        as_requester(
            admin(),
            Mocks {
                feedback,
                ..Mocks::default()
            },
            Router::with_path("feedback/stats").get(handler),
        )
    }

    #[tokio::test]
    async fn empty_store_reports_zeros() -> TestResult {
        let mut feedback = MockFeedbackService::new();

        feedback
            .expect_feedback_stats()
            .once()
            .return_once(|_| Ok(FeedbackStats::default()));

        let body: serde_json::Value = TestClient::get("http://example.com/feedback/stats")
            .send(&make_service(feedback))
            .await
            .take_json()
            .await?;

        assert_eq!(body["totalFeedback"], json!(0));
        assert_eq!(body["averageRating"], json!(0.0));
        assert_eq!(body["ratingDistribution"]["5"], json!(0));

        Ok(())
    }
}
