//! Live I/O statistics for proxy targets.
//!
//! Two-level split, storage vs. snapshot:
//! - **TargetStats**: atomic counters updated on the interception fast path
//! - **StatsSnapshot**: plain-value projection taken at query time
//! - **StatsReport**: fixed-format text rendering for the status resource
//!
//! All counters are monotonic (never decrease, never reset). Snapshots are
//! recomputed fresh on every query; nothing is cached.

mod accumulator;
mod report;

pub use accumulator::{StatsSnapshot, TargetStats, avg_size};
pub use report::{StatsReport, render};
