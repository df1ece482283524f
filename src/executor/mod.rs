// Execution disciplines layered over a QueryPool:
// - query: acquire/execute/release with the poison-on-error signal
// - fallback: replica read retried on the primary when empty
// - metered: named-timer wrapper with call-site guards
// - stream: incremental row delivery holding one connection

pub(crate) mod fallback;
pub(crate) mod metered;
pub(crate) mod query;
pub(crate) mod stream;
