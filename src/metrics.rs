use std::time::Duration;

use tracing::debug;

/// Named-timer collaborator for metered execution.
///
/// One observation per metered query: the caller-supplied name, wall-clock
/// latency, and whether the statement succeeded.
pub trait QueryMetrics: Send + Sync {
    fn observe_query(&self, name: &str, elapsed: Duration, success: bool);
}

/// Default sink: reports observations through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetrics;

impl QueryMetrics for TracingMetrics {
    fn observe_query(&self, name: &str, elapsed: Duration, success: bool) {
        debug!(
            query = name,
            elapsed_ms = elapsed.as_millis() as u64,
            success,
            "query timed"
        );
    }
}
