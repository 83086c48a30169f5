//! Request logging settings shared with the middleware.

use std::{sync::OnceLock, time::Duration};

use crate::config::observability::{LoggingConfig, ObservabilityConfig};

static SETTINGS: OnceLock<RequestLogSettings> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestLogSettings {
    pub(super) slow_threshold: Duration,
    pub(super) propagate_parent: bool,
    pub(super) quiet_paths: Vec<String>,
}

impl Default for RequestLogSettings {
    fn default() -> Self {
        Self {
            slow_threshold: Duration::from_secs(1),
            propagate_parent: false,
            quiet_paths: vec!["/healthcheck".to_string(), "/metrics".to_string()],
        }
    }
}

impl RequestLogSettings {
    fn from_config(logging: &LoggingConfig, observability: &ObservabilityConfig) -> Self {
        Self {
            slow_threshold: Duration::from_millis(logging.slow_request_threshold_ms),
            propagate_parent: observability.otel_enabled && observability.otel_propagate_parent,
            quiet_paths: logging
                .quiet_paths
                .iter()
                .map(|path| path.trim().trim_end_matches('/').to_string())
                .filter(|path| !path.is_empty())
                .collect(),
        }
    }

    /// Whether `path` is exempt from request logs and HTTP metrics.
    pub(super) fn is_quiet(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');

        self.quiet_paths.iter().any(|quiet| quiet == path)
    }
}

/// Install the settings once at startup. Later calls keep the first value.
pub(super) fn install(logging: &LoggingConfig, observability: &ObservabilityConfig) {
    _ = SETTINGS.set(RequestLogSettings::from_config(logging, observability));
}

/// Installed settings, or the defaults when nothing was installed (tests).
pub(super) fn current() -> &'static RequestLogSettings {
    SETTINGS.get_or_init(RequestLogSettings::default)
}
