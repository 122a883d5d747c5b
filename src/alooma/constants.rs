use std::time::Duration;

pub(crate) const ALOOMA_COMPONENT_NAME: &str = "alooma";

/// How long the async-load watcher waits between readiness checks.
pub(crate) const ASYNC_LOAD_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub(crate) const GLOBAL_MISSING_MESSAGE: &str =
    "Global `alooma` handle not available. Did you forget to install the client library handle?";
