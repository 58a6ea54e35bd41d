//! Intercepted I/O request model.
//!
//! Mirrors the fields of a block-layer request that the proxy actually
//! touches: the declared operation, the destination device, and the byte
//! accounting at the moment of interception. Payload data never passes
//! through this crate.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Declared operation of an inbound request.
///
/// Everything that is not a data read or write (flush, discard, ...) is
/// `Other`: still redirected, never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Read,
    Write,
    Other,
}

impl OperationKind {
    /// Convert to string for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Read => "read",
            OperationKind::Write => "write",
            OperationKind::Other => "other",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One in-flight I/O request as seen by the interception path.
///
/// `dest` is the only field the proxy ever mutates; sector, remaining and
/// done are read for classification and bookkeeping but left unchanged.
#[derive(Debug, Clone)]
pub struct IoRequest {
    /// Declared operation.
    pub op: OperationKind,
    /// Destination device. Rewritten by the proxy to the underlying device.
    pub dest: Arc<PathBuf>,
    /// Starting sector on the destination device.
    pub sector: u64,
    /// Bytes left to transfer.
    pub remaining: u64,
    /// Bytes already serviced before this interception (usually 0).
    pub done: u64,
}

impl IoRequest {
    /// Build a request addressed at a virtual device.
    pub fn new(op: OperationKind, dest: impl Into<PathBuf>, sector: u64, remaining: u64) -> Self {
        Self {
            op,
            dest: Arc::new(dest.into()),
            sector,
            remaining,
            done: 0,
        }
    }

    /// Full size of the request as first observed: bytes still to transfer
    /// plus bytes already completed before interception. Saturates instead
    /// of overflowing on hostile inputs.
    pub fn total_size(&self) -> u64 {
        self.remaining.saturating_add(self.done)
    }

    /// Current destination device path.
    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

/// Outcome of mapping a request through a proxy target.
///
/// The host submits the (now rewritten) request to its new destination; the
/// proxy is not re-invoked at completion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapOutcome {
    /// Request destination rewritten; resubmit unchanged.
    Remapped,
}
