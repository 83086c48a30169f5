//! Feedback Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    feedback::{FeedbackResponse, into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeedbackListResponse {
    pub success: bool,
    pub count: usize,
    pub feedback: Vec<FeedbackResponse>,
}

/// Feedback Index Handler
///
/// All feedback, newest first.
#[endpoint(
    tags("feedback"),
    summary = "List Feedback",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "All feedback"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FeedbackListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;

    let feedback = state
        .app
        .feedback
        .list_feedback(requester)
        .await
        .map_err(into_status_error)?;

    Ok(Json(FeedbackListResponse {
        success: true,
        count: feedback.len(),
        feedback: feedback.into_iter().map(Into::into).collect(),
    }))
}
