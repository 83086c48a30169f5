//! Test Notification Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{contact::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestNotificationResponse {
    pub success: bool,

    /// `whatsapp` or `log`
    pub channel: String,

    /// Provider message id, when the provider returns one
    pub message_id: Option<String>,
}

/// Test Notification Handler
///
/// Sends a message through the configured channel and waits for the result.
#[endpoint(
    tags("notifications"),
    summary = "Send Test Notification",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Message delivered"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Provider rejected the message"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<TestNotificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;

    let receipt = state
        .app
        .contact
        .send_test_notification(requester)
        .await
        .map_err(into_status_error)?;

    Ok(Json(TestNotificationResponse {
        success: true,
        channel: state.notifications.as_str().to_string(),
        message_id: receipt.message_id,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use kusuri_app::{
        domain::{
            contact::{ContactServiceError, MockContactService},
            users::Requester,
        },
        notifications::{DeliveryReceipt, NotifierError},
    };

    use crate::test_helpers::{Mocks, admin, as_requester, customer};

    use super::*;

    fn make_service(requester: Requester, contact: MockContactService) -> Service {
        as_requester(
            requester,
            Mocks {
                contact,
                ..Mocks::default()
            },
            Router::with_path("notifications/test").post(handler),
        )
    }

    #[tokio::test]
    async fn admin_gets_the_receipt() -> TestResult {
        let mut contact = MockContactService::new();

        contact
            .expect_send_test_notification()
            .once()
            .return_once(|_| {
                Ok(DeliveryReceipt {
                    message_id: Some("wamid.test".to_string()),
                })
            });

        let response: TestNotificationResponse =
            TestClient::post("http://example.com/notifications/test")
                .send(&make_service(admin(), contact))
                .await
                .take_json()
                .await?;

        assert_eq!(response.channel, "log");
        assert_eq!(response.message_id.as_deref(), Some("wamid.test"));

        Ok(())
    }

    #[tokio::test]
    async fn provider_rejection_returns_502() -> TestResult {
        let mut contact = MockContactService::new();

        contact
            .expect_send_test_notification()
            .once()
            .return_once(|_| {
                Err(ContactServiceError::Delivery(NotifierError::Rejected {
                    status: 401,
                    body: "invalid token".to_string(),
                }))
            });

        let res = TestClient::post("http://example.com/notifications/test")
            .send(&make_service(admin(), contact))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }

    #[tokio::test]
    async fn customer_gets_403() -> TestResult {
        let mut contact = MockContactService::new();

        contact
            .expect_send_test_notification()
            .once()
            .return_once(|_| Err(ContactServiceError::Forbidden));

        let res = TestClient::post("http://example.com/notifications/test")
            .send(&make_service(customer(), contact))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
