//! RAII-managed handle to the underlying storage device.
//!
//! The handle is exclusively owned by one proxy target and released exactly
//! once when that owner is dropped. There is no explicit close method, so a
//! double close cannot be written.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::request::IoRequest;

/// Access mode for the underlying device, inherited from the enclosing
/// table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

impl AccessMode {
    /// Get string representation of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::ReadOnly => "ro",
            AccessMode::ReadWrite => "rw",
        }
    }

    fn open_options(&self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self {
            AccessMode::ReadOnly => opts.read(true),
            AccessMode::ReadWrite => opts.read(true).write(true),
        };
        opts
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opened reference to the underlying storage device.
///
/// Holds the device open for the lifetime of the owning proxy target.
/// `redirect` is a pure metadata rewrite; the handle performs no I/O.
#[derive(Debug)]
pub struct DeviceHandle {
    path: Arc<PathBuf>,
    file: File,
    mode: AccessMode,
}

impl DeviceHandle {
    /// Resolve `path` and open it in `mode`.
    ///
    /// Fails with [`ConfigError::DeviceLookup`] when the path does not
    /// resolve or cannot be opened in that mode.
    pub fn open(path: impl Into<PathBuf>, mode: AccessMode) -> Result<Self, ConfigError> {
        let path = path.into();
        let file = mode.open_options().open(&path).map_err(|e| {
            tracing::warn!("device lookup failed for {} ({}): {}", path.display(), mode, e);
            ConfigError::device_lookup(&path, e)
        })?;

        tracing::debug!("opened underlying device {} ({})", path.display(), mode);
        Ok(Self {
            path: Arc::new(path),
            file,
            mode,
        })
    }

    /// Rewrite the request's destination to this handle's underlying device.
    ///
    /// Sector, length and payload are untouched. Does not wait for anything.
    pub fn redirect(&self, req: &mut IoRequest) {
        req.dest = Arc::clone(&self.path);
    }

    /// Path of the underlying device.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode the device was opened in.
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Borrow the open file, e.g. for host-side submission plumbing.
    pub fn file(&self) -> &File {
        &self.file
    }
}

impl Drop for DeviceHandle {
    fn drop(&mut self) {
        // File descriptor closes with the File; just leave a trace.
        tracing::debug!("released underlying device {}", self.path.display());
    }
}
