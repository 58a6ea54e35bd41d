//! dmproxy - transparent block-device passthrough proxy
//!
//! Forwards every read/write request unchanged to an underlying storage
//! device while keeping live aggregate statistics (request counts and byte
//! totals per operation kind), exposed through a read-only status report.
//!
//! The host routing layer constructs one [`ProxyTarget`] per configured
//! mapping, calls [`ProxyTarget::map`] once per inbound request (from any
//! number of threads concurrently), and renders the status report with
//! [`stats::render`] at any time. Tearing down is
//! [`ProxyTarget::destruct`], which consumes the target.
//!
//! ```no_run
//! use dmproxy::{AccessMode, IoRequest, OperationKind, ProxyTarget, stats};
//!
//! # fn main() -> Result<(), dmproxy::ProxyError> {
//! let args = vec!["/dev/sdb1".to_string()];
//! let target = ProxyTarget::construct(&args, AccessMode::ReadWrite)?;
//!
//! let mut req = IoRequest::new(OperationKind::Read, "/dev/mapper/proxy0", 0, 4096);
//! target.map(&mut req);
//! // submit `req` to its new destination...
//!
//! println!("{}", stats::render(Some(&target))?);
//! target.destruct();
//! # Ok(())
//! # }
//! ```

pub mod device;
pub mod errors;
pub mod request;
pub mod stats;
pub mod target;

pub use device::{AccessMode, DeviceHandle};
pub use errors::{ConfigError, ProxyError, ProxyResult, ReportError};
pub use request::{IoRequest, OperationKind, RemapOutcome};
pub use stats::{StatsReport, StatsSnapshot, TargetStats};
pub use target::ProxyTarget;
