//! Contact service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    domain::{
        contact::{ContactInquiry, errors::ContactServiceError},
        users::Requester,
        validation::{is_valid_email, non_blank},
    },
    notifications::{self, DeliveryReceipt, NotificationKind, Notifier, messages},
};

/// Forwards contact inquiries through the configured notifier.
#[derive(Clone)]
pub struct RelayContactService {
    notifier: Arc<dyn Notifier>,
}

impl RelayContactService {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

impl fmt::Debug for RelayContactService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayContactService").finish_non_exhaustive()
    }
}

fn validate_inquiry(inquiry: &ContactInquiry) -> Result<ContactInquiry, ContactServiceError> {
    let inquiry = ContactInquiry {
        name: non_blank(&inquiry.name).ok_or(ContactServiceError::BlankField("name"))?,
        email: non_blank(&inquiry.email).ok_or(ContactServiceError::BlankField("email"))?,
        phone: non_blank(&inquiry.phone).ok_or(ContactServiceError::BlankField("phone"))?,
        message: non_blank(&inquiry.message).ok_or(ContactServiceError::BlankField("message"))?,
    };

    if !is_valid_email(&inquiry.email) {
        return Err(ContactServiceError::InvalidEmail);
    }

    Ok(inquiry)
}

#[async_trait]
impl ContactService for RelayContactService {
    async fn submit_inquiry(&self, inquiry: ContactInquiry) -> Result<(), ContactServiceError> {
        let inquiry = validate_inquiry(&inquiry)?;

        tracing::info!(email = %inquiry.email, "contact inquiry received");

        notifications::dispatch(
            Arc::clone(&self.notifier),
            NotificationKind::Contact,
            messages::contact_inquiry(&inquiry, Timestamp::now()),
        );

        Ok(())
    }

    async fn send_test_notification(
        &self,
        requester: &Requester,
    ) -> Result<DeliveryReceipt, ContactServiceError> {
        if !requester.is_admin() {
            return Err(ContactServiceError::Forbidden);
        }

        let receipt = self
            .notifier
            .notify(NotificationKind::Test, &messages::test_message(Timestamp::now()))
            .await?;

        Ok(receipt)
    }
}

#[automock]
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Validate an inquiry and relay it to the admin without waiting for delivery.
    async fn submit_inquiry(&self, inquiry: ContactInquiry) -> Result<(), ContactServiceError>;

    /// Send a connectivity check and report the provider's answer. Admin only.
    async fn send_test_notification(
        &self,
        requester: &Requester,
    ) -> Result<DeliveryReceipt, ContactServiceError>;
}
