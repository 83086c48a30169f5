//! Admin notifications
//!
//! Orders and contact inquiries are relayed to a single admin contact point. Delivery is
//! best-effort: [`dispatch`] runs the send on a detached task and only logs the outcome.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::Instrument;

mod log;
pub mod messages;
mod whatsapp;

pub use log::LogNotifier;
pub use whatsapp::{WhatsAppConfig, WhatsAppNotifier};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Order,
    Contact,
    Test,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Contact => "contact",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider acknowledgement for a delivered message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider-assigned message id, when the provider returns one.
    pub message_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("notification request failed")]
    Http(#[from] reqwest::Error),

    #[error("notification provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("notification provider response had no message id")]
    MissingMessageId,
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message` to the admin contact point.
    async fn notify(
        &self,
        kind: NotificationKind,
        message: &str,
    ) -> Result<DeliveryReceipt, NotifierError>;
}

/// Send `message` on a detached task.
///
/// The returned handle exists for tests; request paths drop it.
pub fn dispatch(
    notifier: Arc<dyn Notifier>,
    kind: NotificationKind,
    message: String,
) -> JoinHandle<()> {
    let span = tracing::info_span!("notifications.dispatch", kind = kind.as_str());

    tokio::spawn(
        async move {
            match notifier.notify(kind, &message).await {
                Ok(receipt) => {
                    tracing::info!(message_id = ?receipt.message_id, "notification delivered");
                }
                Err(error) => {
                    tracing::warn!(error = %error, "notification delivery failed");
                }
            }
        }
        .instrument(span),
    )
}
