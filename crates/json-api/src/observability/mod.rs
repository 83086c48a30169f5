//! Logs, traces and metrics for the HTTP surface.

use thiserror::Error;

mod init;
pub(crate) mod metrics;
mod notifier;
mod otel;
mod request;
mod settings;

pub(crate) use init::Observability;
pub(crate) use metrics::metrics_handler;
pub(crate) use notifier::MeteredNotifier;
pub(crate) use request::request_logging;

/// Why telemetry could not be brought up. Either way the server refuses to start.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("OTLP span exporter could not be built: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("a global tracing subscriber is already installed: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
