//! Atomic per-operation counters and their snapshot projection.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::request::OperationKind;

/// Counter pair for one operation kind.
///
/// Both fields are monotonic for the lifetime of the owning target.
#[derive(Default, Debug)]
struct OpCounter {
    requests: AtomicU64,
    bytes: AtomicU64,
}

impl OpCounter {
    fn record(&self, size_bytes: u64) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(size_bytes, Ordering::Relaxed);
    }

    fn load(&self) -> (u64, u64) {
        (
            self.requests.load(Ordering::Relaxed),
            self.bytes.load(Ordering::Relaxed),
        )
    }
}

/// Storage for one proxy target's statistics.
///
/// One instance per target, updated concurrently from the interception fast
/// path. `record` is lock-free: two relaxed fetch-adds, nothing else. Readers
/// take a [`StatsSnapshot`] and never block writers.
#[derive(Default, Debug)]
pub struct TargetStats {
    read: OpCounter,
    write: OpCounter,
}

impl TargetStats {
    /// Create zeroed statistics storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request of `kind` asking to transfer `size_bytes`.
    ///
    /// `Other` requests are not counted. Safe to call from any number of
    /// threads concurrently; never blocks.
    pub fn record(&self, kind: OperationKind, size_bytes: u64) {
        match kind {
            OperationKind::Read => self.read.record(size_bytes),
            OperationKind::Write => self.write.record(size_bytes),
            OperationKind::Other => {}
        }
    }

    /// Take a point-in-time snapshot of all counters.
    ///
    /// Each value is individually non-torn; cross-counter consistency is not
    /// guaranteed (a concurrent `record` may land between loads).
    pub fn snapshot(&self) -> StatsSnapshot {
        let (read_requests, read_bytes) = self.read.load();
        let (write_requests, write_bytes) = self.write.load();
        StatsSnapshot {
            read_requests,
            read_bytes,
            write_requests,
            write_bytes,
        }
    }
}

/// Truncating integer average; 0 when there were no requests.
pub fn avg_size(total_bytes: u64, requests: u64) -> u64 {
    if requests == 0 {
        return 0;
    }
    total_bytes / requests
}

/// Point-in-time projection of a target's counters.
///
/// Plain values, never mutated after capture. Derived totals and averages
/// are computed on access, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Read requests intercepted.
    pub read_requests: u64,
    /// Bytes requested by read requests.
    pub read_bytes: u64,
    /// Write requests intercepted.
    pub write_requests: u64,
    /// Bytes requested by write requests.
    pub write_bytes: u64,
}

impl StatsSnapshot {
    /// Average read request size in bytes (truncating).
    pub fn read_avg_size(&self) -> u64 {
        avg_size(self.read_bytes, self.read_requests)
    }

    /// Average write request size in bytes (truncating).
    pub fn write_avg_size(&self) -> u64 {
        avg_size(self.write_bytes, self.write_requests)
    }

    /// Read plus write requests.
    pub fn total_requests(&self) -> u64 {
        self.read_requests + self.write_requests
    }

    /// Read plus write bytes.
    pub fn total_bytes(&self) -> u64 {
        self.read_bytes + self.write_bytes
    }

    /// Average size across read and write requests (truncating).
    pub fn total_avg_size(&self) -> u64 {
        avg_size(self.total_bytes(), self.total_requests())
    }
}
