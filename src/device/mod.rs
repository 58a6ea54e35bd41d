//! Underlying device access.
//!
//! - `DeviceHandle` - RAII wrapper around the opened underlying device
//! - `AccessMode` - open mode inherited from the enclosing table configuration

mod handle;

pub use handle::{AccessMode, DeviceHandle};
