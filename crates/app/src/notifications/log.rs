//! Fallback notifier used when no provider is configured.

use async_trait::async_trait;

use crate::notifications::{DeliveryReceipt, NotificationKind, Notifier, NotifierError};

/// Writes notifications to the log instead of sending them anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        kind: NotificationKind,
        message: &str,
    ) -> Result<DeliveryReceipt, NotifierError> {
        tracing::info!(
            kind = kind.as_str(),
            message,
            "notification provider not configured, logging message"
        );

        Ok(DeliveryReceipt::default())
    }
}
