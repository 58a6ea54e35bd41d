//! Error types for proxy target construction and status queries.
//!
//! Errors are categorized by the boundary that surfaces them:
//! - [`ConfigError`]: table-line/construction failures (caller must refuse the mapping)
//! - [`ReportError`]: status query failures (no data path impact)
//!
//! Lifecycle contract violations (double destruct, map after destruct) have no
//! error variants on purpose: [`crate::ProxyTarget`] consumes itself on
//! destruct, so those calls do not compile.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Top-Level Error
// ============================================================================

/// Errors that can occur anywhere in the proxy crate.
///
/// ```ignore
/// match ProxyTarget::construct(&args, mode) {
///     Err(e) => match ProxyError::from(e) {
///         ProxyError::Config(_) => { /* reject the table line */ }
///         _ => {}
///     },
///     Ok(target) => { /* activate mapping */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Construction/configuration failed (mapping must not activate).
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// Status report could not be produced.
    #[error("report: {0}")]
    Report(#[from] ReportError),

    /// Generic IO error (catch-all).
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Config Errors (construction, user-fixable)
// ============================================================================

/// Errors raised while constructing a proxy target from its table arguments.
///
/// All of these surface synchronously from `construct()`; none are retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The table line did not carry exactly one argument (the device path).
    #[error("invalid argument count: expected 1, got {got}")]
    ArgumentCount { got: usize },

    /// Storage for the target's state could not be obtained.
    #[error("cannot allocate proxy target context")]
    Allocation,

    /// The device path did not resolve to a device openable in the
    /// requested mode.
    #[error("device lookup failed for {path}: {source}")]
    DeviceLookup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// Create a device lookup error.
    pub fn device_lookup(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DeviceLookup {
            path: path.into(),
            source,
        }
    }
}

// ============================================================================
// Report Errors (status query path)
// ============================================================================

/// Errors raised by the read-only status query path.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No proxy target is active, so there are no statistics to render.
    #[error("no active proxy target")]
    NoActiveInstance,
}

/// Convenience alias for hosts whose call sites mix construction and
/// report errors (both convert into [`ProxyError`] via `?`).
pub type ProxyResult<T> = Result<T, ProxyError>;
