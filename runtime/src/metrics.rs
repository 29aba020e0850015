//! Metrics emitted by the store.
//!
//! The store records through the `metrics` facade only. Nothing is exported
//! unless the host installs a recorder (Prometheus, statsd, a test recorder);
//! without one every call is a no-op.
//!
//! Every metric carries a `store` label holding [`StoreConfig::label`](crate::StoreConfig).
//!
//! # Example
//!
//! ```
//! // Once at startup, after installing a recorder
//! unistore_runtime::metrics::describe_metrics();
//! ```

use metrics::{Unit, describe_counter, describe_histogram};

/// Actions that went through a reducer (queued actions included).
pub const DISPATCH_TOTAL: &str = "store.dispatch.total";

/// Re-entrant dispatches rejected under [`ReentrancyPolicy::Reject`](crate::ReentrancyPolicy).
pub const DISPATCH_REJECTED: &str = "store.dispatch.rejected";

/// Re-entrant dispatches deferred under [`ReentrancyPolicy::Queue`](crate::ReentrancyPolicy).
pub const DISPATCH_QUEUED: &str = "store.dispatch.queued";

/// Listener invocations.
pub const LISTENERS_NOTIFIED: &str = "store.listeners.notified";

/// Time spent inside the reducer per action.
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Register descriptions for every store metric with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(
        DISPATCH_TOTAL,
        Unit::Count,
        "Total number of actions reduced by the store"
    );
    describe_counter!(
        DISPATCH_REJECTED,
        Unit::Count,
        "Re-entrant dispatches rejected while another dispatch was in flight"
    );
    describe_counter!(
        DISPATCH_QUEUED,
        Unit::Count,
        "Re-entrant dispatches queued behind the in-flight dispatch"
    );
    describe_counter!(
        LISTENERS_NOTIFIED,
        Unit::Count,
        "Total number of listener invocations"
    );
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time taken to execute the reducer for one action"
    );
}
