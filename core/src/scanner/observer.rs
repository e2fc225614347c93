use sweepr_common::network::host::HostProbeResult;
use sweepr_common::network::report::ScanReport;

use super::phase::ScanPhase;

/// The two probing stages of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Liveness,
    Ports,
}

/// Receives progress from a running scan.
///
/// Every method is called from the task driving the scan, in order, so
/// implementations need no ordering logic of their own.
pub trait ScanObserver: Send + Sync {
    fn phase_changed(&self, _phase: ScanPhase) {}

    fn stage_started(&self, _stage: Stage, _total: u64) {}

    /// `completed` counts addresses for [`Stage::Liveness`] and hosts whose
    /// whole port set finished for [`Stage::Ports`].
    fn progress(&self, _stage: Stage, _completed: u64, _total: u64) {}

    fn host_online(&self, _host: &HostProbeResult) {}

    /// Called once in the reporting phase, before any export is attempted.
    fn report_ready(&self, _report: &ScanReport) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ScanObserver for Silent {}
