//! Delivery outcome metrics for admin notifications.

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use kusuri_app::notifications::{DeliveryReceipt, NotificationKind, Notifier, NotifierError};

use super::metrics;

/// Wraps a [`Notifier`] and counts each delivery attempt.
pub(crate) struct MeteredNotifier {
    inner: Arc<dyn Notifier>,
}

impl MeteredNotifier {
    pub(crate) fn new(inner: Arc<dyn Notifier>) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for MeteredNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeteredNotifier").finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for MeteredNotifier {
    async fn notify(
        &self,
        kind: NotificationKind,
        message: &str,
    ) -> Result<DeliveryReceipt, NotifierError> {
        let result = self.inner.notify(kind, message).await;

        let outcome = if result.is_ok() { "sent" } else { "failed" };

        metrics::record_notification(kind.as_str(), outcome);

        result
    }
}
