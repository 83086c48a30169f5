//! Contact Inquiry Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use kusuri_app::domain::contact::ContactInquiry;

use crate::{contact::into_status_error, extensions::*, state::State};

/// Contact Inquiry Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl From<ContactRequest> for ContactInquiry {
    fn from(request: ContactRequest) -> Self {
        ContactInquiry {
            name: request.name,
            email: request.email,
            phone: request.phone,
            message: request.message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// Contact Inquiry Handler
///
/// Forwards the inquiry to the store admin. Nothing is stored.
#[endpoint(
    tags("contact"),
    summary = "Send Inquiry",
    responses(
        (status_code = StatusCode::OK, description = "Inquiry accepted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing field or invalid email"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ContactRequest>,
    depot: &mut Depot,
) -> Result<Json<ContactResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .contact
        .submit_inquiry(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ContactResponse {
        success: true,
        message: "Thanks for reaching out. We'll get back to you soon.".to_string(),
    }))
}
