//! Shared fixtures for service tests.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
pub(crate) use recording::RecordingNotifier;
