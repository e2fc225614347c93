//! # Scan Report
//!
//! The final, immutable result of a scan: one [`HostRecord`] per online
//! host, ordered by ascending address regardless of the order in which the
//! probes completed.

use std::time::Duration;

use crate::network::host::HostRecord;

/// Totals describing how a scan went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Addresses that received a verdict from the liveness stage.
    pub probed: u64,
    /// Addresses the range expanded to.
    pub total: u64,
    pub elapsed: Duration,
    /// Set when the scan was cancelled before every probe finished.
    pub interrupted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanReport {
    hosts: Vec<HostRecord>,
    summary: ScanSummary,
}

impl ScanReport {
    pub fn new(mut hosts: Vec<HostRecord>, summary: ScanSummary) -> Self {
        hosts.sort_by_key(HostRecord::address);
        hosts.dedup_by_key(|host| host.address());
        Self { hosts, summary }
    }

    pub fn hosts(&self) -> &[HostRecord] {
        &self.hosts
    }

    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    pub fn online_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn offline_count(&self) -> u64 {
        self.summary.probed.saturating_sub(self.hosts.len() as u64)
    }

    pub fn interrupted(&self) -> bool {
        self.summary.interrupted
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
