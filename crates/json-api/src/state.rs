//! State

use std::sync::Arc;

use kusuri_app::context::AppContext;

/// Where admin notifications end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NotificationChannel {
    WhatsApp,
    Log,
}

impl NotificationChannel {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::WhatsApp => "whatsapp",
            Self::Log => "log",
        }
    }
}

/// Shared request state injected into every route.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) notifications: NotificationChannel,
}

impl State {
    pub(crate) fn shared(app: AppContext, notifications: NotificationChannel) -> Arc<Self> {
        Arc::new(Self { app, notifications })
    }
}
