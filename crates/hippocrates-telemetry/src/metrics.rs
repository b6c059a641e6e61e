//! Dispatch metrics for Hippocrates.
//!
//! Metrics are recorded through the `metrics` facade. Installing a recorder
//! (Prometheus, StatsD, ...) is left to the embedding service; without one,
//! recording is a no-op.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `hippocrates_dispatch_total` | Counter | `interaction`, `outcome` | Handled requests |
//! | `hippocrates_dispatch_duration_seconds` | Histogram | `interaction` | Handler latency |
//! | `hippocrates_operations_registered` | Gauge | - | Bound operations |

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Counter of handled requests.
pub const DISPATCH_TOTAL: &str = "hippocrates_dispatch_total";

/// Histogram of handler latency.
pub const DISPATCH_DURATION: &str = "hippocrates_dispatch_duration_seconds";

/// Gauge of bound operations.
pub const OPERATIONS_REGISTERED: &str = "hippocrates_operations_registered";

/// `interaction` label used when no operation matched.
pub const UNMATCHED: &str = "unmatched";

/// Registers descriptions for all standard metrics.
pub fn describe_metrics() {
    describe_counter!(
        DISPATCH_TOTAL,
        "Total number of requests handled, by interaction and outcome"
    );
    describe_histogram!(
        DISPATCH_DURATION,
        "Handler invocation duration in seconds"
    );
    describe_gauge!(
        OPERATIONS_REGISTERED,
        "Number of operations bound to handlers"
    );
}

/// Records a handled request.
///
/// * `interaction` - interaction kind, or [`UNMATCHED`]
/// * `outcome` - `ok` or the error category
pub fn record_dispatch(interaction: &'static str, outcome: &'static str) {
    counter!(
        DISPATCH_TOTAL,
        "interaction" => interaction,
        "outcome" => outcome
    )
    .increment(1);
}

/// Records how long a handler took.
pub fn record_dispatch_duration(interaction: &'static str, duration: Duration) {
    histogram!(DISPATCH_DURATION, "interaction" => interaction).record(duration.as_secs_f64());
}

/// Sets the number of bound operations.
#[allow(clippy::cast_precision_loss)]
pub fn set_operations_registered(count: usize) {
    gauge!(OPERATIONS_REGISTERED).set(count as f64);
}
