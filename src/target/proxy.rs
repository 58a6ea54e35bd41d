//! Passthrough proxy target: construct, map, destruct.
//!
//! Lifecycle is expressed through ownership rather than runtime state checks:
//! `construct` returns the owner, `map` borrows it, `destruct` consumes it.
//! Mapping through a destructed target or destructing twice does not compile.
//!
//! The host owns one `ProxyTarget` per configured mapping and passes it
//! explicitly into `map`; there is no process-wide instance. Any number of
//! independently configured targets may coexist.

use std::path::Path;

use crate::device::{AccessMode, DeviceHandle};
use crate::errors::ConfigError;
use crate::request::{IoRequest, OperationKind, RemapOutcome};
use crate::stats::{StatsSnapshot, TargetStats};

/// One active proxy mapping onto an underlying device.
///
/// Owns the device handle and the statistics storage; both are released
/// exactly once, when the target is destructed or dropped. `map` takes
/// `&self`, so a host may share the target across request threads and map
/// concurrently without ordering.
#[derive(Debug)]
pub struct ProxyTarget {
    dev: DeviceHandle,
    stats: TargetStats,
}

impl ProxyTarget {
    /// Construct a proxy mapping from its table arguments: `<dev_path>`.
    ///
    /// `mode` is the access mode of the enclosing table. Fails with
    /// [`ConfigError::ArgumentCount`] unless exactly one argument is given
    /// and with [`ConfigError::DeviceLookup`] when the device cannot be
    /// opened in `mode`. On success the target is Active with zeroed
    /// counters; no state is shared with any other construction.
    pub fn construct(args: &[String], mode: AccessMode) -> Result<Self, ConfigError> {
        if args.len() != 1 {
            return Err(ConfigError::ArgumentCount { got: args.len() });
        }

        let dev = DeviceHandle::open(&args[0], mode)?;
        tracing::debug!("constructed proxy target over {}", dev.path().display());

        Ok(Self {
            dev,
            stats: TargetStats::new(),
        })
    }

    /// Intercept one inbound request.
    ///
    /// Classifies the request, counts reads and writes (by full request size
    /// as first observed: remaining plus already-completed bytes), and
    /// rewrites its destination to the underlying device. `Other` requests
    /// are redirected but not counted. Infallible; never blocks, never locks,
    /// performs no I/O. Not re-invoked at completion time.
    pub fn map(&self, req: &mut IoRequest) -> RemapOutcome {
        match req.op {
            OperationKind::Read | OperationKind::Write => {
                self.stats.record(req.op, req.total_size());
            }
            OperationKind::Other => {}
        }

        self.dev.redirect(req);
        RemapOutcome::Remapped
    }

    /// Tear the mapping down.
    ///
    /// Consumes the target: the device handle closes and the counters are
    /// released with it. The caller must have quiesced all `map` calls first.
    pub fn destruct(self) {
        let snap = self.stats.snapshot();
        tracing::debug!(
            "destructing proxy target over {}: {} reads, {} writes",
            self.dev.path().display(),
            snap.read_requests,
            snap.write_requests,
        );
        // Drop releases the device handle and stats storage.
    }

    /// Live statistics storage for this target.
    pub fn stats(&self) -> &TargetStats {
        &self.stats
    }

    /// Point-in-time snapshot of this target's counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Path of the underlying device.
    pub fn device_path(&self) -> &Path {
        self.dev.path()
    }

    /// Access mode the underlying device was opened in.
    pub fn access_mode(&self) -> AccessMode {
        self.dev.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn backing_device() -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("create backing file");
        f.write_all(&[0u8; 8192]).expect("fill backing file");
        f
    }

    fn construct_over(backing: &NamedTempFile) -> ProxyTarget {
        let args = vec![backing.path().to_string_lossy().into_owned()];
        ProxyTarget::construct(&args, AccessMode::ReadWrite).expect("construct proxy target")
    }

    #[test]
    fn test_construct_rejects_wrong_argument_count() {
        let err = ProxyTarget::construct(&[], AccessMode::ReadWrite)
            .expect_err("no args must fail");
        assert!(matches!(err, ConfigError::ArgumentCount { got: 0 }));

        let args = vec!["a".to_string(), "b".to_string()];
        let err = ProxyTarget::construct(&args, AccessMode::ReadWrite)
            .expect_err("two args must fail");
        assert!(matches!(err, ConfigError::ArgumentCount { got: 2 }));
    }

    #[test]
    fn test_construct_rejects_unopenable_device() {
        let args = vec!["/nonexistent/device".to_string()];
        let err = ProxyTarget::construct(&args, AccessMode::ReadWrite)
            .expect_err("bad device must fail");
        assert!(matches!(err, ConfigError::DeviceLookup { .. }));
    }

    #[test]
    fn test_map_redirects_and_counts_reads_and_writes() {
        let backing = backing_device();
        let target = construct_over(&backing);

        let mut req = IoRequest::new(OperationKind::Read, "/dev/proxy0", 8, 4096);
        let outcome = target.map(&mut req);
        assert_eq!(outcome, RemapOutcome::Remapped);
        assert_eq!(req.dest(), backing.path());
        assert_eq!(req.sector, 8);
        assert_eq!(req.remaining, 4096);

        let mut req = IoRequest::new(OperationKind::Write, "/dev/proxy0", 0, 512);
        target.map(&mut req);
        assert_eq!(req.dest(), backing.path());

        let snap = target.snapshot();
        assert_eq!(snap.read_requests, 1);
        assert_eq!(snap.read_bytes, 4096);
        assert_eq!(snap.write_requests, 1);
        assert_eq!(snap.write_bytes, 512);
    }

    #[test]
    fn test_map_redirects_but_never_counts_other() {
        let backing = backing_device();
        let target = construct_over(&backing);

        let mut req = IoRequest::new(OperationKind::Other, "/dev/proxy0", 0, 0);
        assert_eq!(target.map(&mut req), RemapOutcome::Remapped);
        assert_eq!(req.dest(), backing.path());

        let snap = target.snapshot();
        assert_eq!(snap.total_requests(), 0);
    }

    #[test]
    fn test_map_counts_full_size_of_partially_serviced_request() {
        let backing = backing_device();
        let target = construct_over(&backing);

        let mut req = IoRequest::new(OperationKind::Read, "/dev/proxy0", 0, 1024);
        req.done = 3072;
        target.map(&mut req);

        let snap = target.snapshot();
        assert_eq!(snap.read_bytes, 4096);
    }

    #[test]
    fn test_independent_targets_share_no_state() {
        let backing_a = backing_device();
        let backing_b = backing_device();
        let target_a = construct_over(&backing_a);
        let target_b = construct_over(&backing_b);

        let mut req = IoRequest::new(OperationKind::Write, "/dev/proxy0", 0, 2048);
        target_a.map(&mut req);
        assert_eq!(req.dest(), backing_a.path());

        assert_eq!(target_a.snapshot().write_requests, 1);
        assert_eq!(target_b.snapshot().write_requests, 0);

        target_a.destruct();
        target_b.destruct();
    }

    #[test]
    fn test_target_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProxyTarget>();
    }
}
