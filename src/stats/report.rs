//! Fixed-format text report for the read-only status resource.
//!
//! The rendered text is an external interface contract (historically exposed
//! as a single read-only attribute named `volumes`); the layout lives here,
//! apart from the accumulator, so counter code never depends on it.

use crate::errors::ReportError;
use crate::stats::StatsSnapshot;
use crate::target::ProxyTarget;

/// Point-in-time statistics report.
///
/// Wraps a snapshot taken at render time; [`std::fmt::Display`] produces the
/// exact wire text. Nothing is cached: render again for fresh numbers.
#[derive(Debug, Clone, Copy)]
pub struct StatsReport {
    snapshot: StatsSnapshot,
}

impl StatsReport {
    /// The snapshot this report was rendered from.
    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot
    }
}

impl std::fmt::Display for StatsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = &self.snapshot;
        writeln!(f, "read:")?;
        writeln!(f, "   regs: {}", s.read_requests)?;
        writeln!(f, "   avg size: {}", s.read_avg_size())?;
        writeln!(f, "write:")?;
        writeln!(f, "   regs: {}", s.write_requests)?;
        writeln!(f, "   avg size: {}", s.write_avg_size())?;
        writeln!(f, "total:")?;
        writeln!(f, "   regs: {}", s.total_requests())?;
        writeln!(f, "   avg size: {}", s.total_avg_size())
    }
}

/// Render a report from the active target, if any.
///
/// Fails with [`ReportError::NoActiveInstance`] when no target is supplied;
/// the status resource must return an error rather than zeroed text.
pub fn render(target: Option<&ProxyTarget>) -> Result<StatsReport, ReportError> {
    let target = target.ok_or(ReportError::NoActiveInstance)?;
    let report = StatsReport {
        snapshot: target.snapshot(),
    };
    tracing::debug!(
        "rendered stats report for {}: {} reads, {} writes",
        target.device_path().display(),
        report.snapshot.read_requests,
        report.snapshot.write_requests,
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_for(snapshot: StatsSnapshot) -> StatsReport {
        StatsReport { snapshot }
    }

    #[test]
    fn test_render_without_target_fails() {
        let err = render(None).expect_err("render must fail with no target");
        assert!(matches!(err, ReportError::NoActiveInstance));
    }

    #[test]
    fn test_report_text_layout() {
        let report = report_for(StatsSnapshot {
            read_requests: 3,
            read_bytes: 3 * 4096,
            write_requests: 1,
            write_bytes: 8192,
        });
        assert_eq!(
            report.to_string(),
            "read:\n\
             \x20  regs: 3\n\
             \x20  avg size: 4096\n\
             write:\n\
             \x20  regs: 1\n\
             \x20  avg size: 8192\n\
             total:\n\
             \x20  regs: 4\n\
             \x20  avg size: 5120\n"
        );
    }

    #[test]
    fn test_report_text_when_idle() {
        let report = report_for(StatsSnapshot {
            read_requests: 0,
            read_bytes: 0,
            write_requests: 0,
            write_bytes: 0,
        });
        assert_eq!(
            report.to_string(),
            "read:\n\
             \x20  regs: 0\n\
             \x20  avg size: 0\n\
             write:\n\
             \x20  regs: 0\n\
             \x20  avg size: 0\n\
             total:\n\
             \x20  regs: 0\n\
             \x20  avg size: 0\n"
        );
    }

    #[test]
    fn test_report_truncates_averages() {
        // 7 bytes over 2 requests truncates to 3.
        let report = report_for(StatsSnapshot {
            read_requests: 2,
            read_bytes: 7,
            write_requests: 0,
            write_bytes: 0,
        });
        let text = report.to_string();
        assert!(text.contains("read:\n   regs: 2\n   avg size: 3\n"));
    }
}
