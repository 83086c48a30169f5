//! Submit Feedback Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use kusuri_app::domain::feedback::{data::NewFeedback, records::FeedbackUuid};

use crate::{
    extensions::*,
    feedback::{FeedbackResponse, into_status_error},
    state::State,
};

/// Submit Feedback Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateFeedbackRequest {
    /// 1 to 5
    pub rating: u8,
    pub message: String,
}

/// Submitted Feedback Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeedbackCreatedResponse {
    pub success: bool,
    pub feedback: FeedbackResponse,
}

/// Submit Feedback Handler
#[endpoint(
    tags("feedback"),
    summary = "Submit Feedback",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Feedback recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid rating or empty message"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateFeedbackRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<FeedbackCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;
    let request = json.into_inner();

    let feedback = state
        .app
        .feedback
        .submit_feedback(
            requester,
            NewFeedback {
                uuid: FeedbackUuid::new(),
                rating: request.rating,
                message: request.message,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(FeedbackCreatedResponse {
        success: true,
        feedback: feedback.into(),
    }))
}
