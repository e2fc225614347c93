#![cfg(test)]
//! In-memory network used to drive the scanner deterministically.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::config::ScanConfig;
use sweepr_common::network::host::{HostProbeResult, PortState};
use sweepr_core::network::{LivenessProbe, PortProbe};
use sweepr_core::scanner::Scanner;
use sweepr_core::scanner::observer::{ScanObserver, Stage};
use sweepr_core::scanner::phase::ScanPhase;
use tokio::time::{sleep, timeout};

/// A fake network: every listed host answers after its RTT and listens on
/// its ports, everything else is silent. A host slower than the timeout a
/// probe is given looks silent too.
#[derive(Default)]
pub struct FakeNetwork {
    hosts: HashMap<Ipv4Addr, (Duration, Vec<u16>)>,
    liveness_calls: Mutex<Vec<Ipv4Addr>>,
    port_calls: Mutex<Vec<(Ipv4Addr, u16)>>,
    timeouts: Mutex<Vec<Duration>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeNetwork {
    pub fn with_host(mut self, addr: Ipv4Addr, rtt_ms: u64, open: &[u16]) -> Self {
        self.hosts.insert(addr, (Duration::from_millis(rtt_ms), open.to_vec()));
        self
    }

    pub fn liveness_calls(&self) -> Vec<Ipv4Addr> {
        let mut calls = self.liveness_calls.lock().unwrap().clone();
        calls.sort();
        calls
    }

    pub fn port_calls(&self) -> Vec<(Ipv4Addr, u16)> {
        let mut calls = self.port_calls.lock().unwrap().clone();
        calls.sort();
        calls
    }

    /// Timeout handed to each call, liveness and port calls alike.
    pub fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.lock().unwrap().clone()
    }

    /// Most calls that were ever outstanding at the same moment.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Waits out the host's RTT within `limit`; `None` when the host is
    /// unknown or too slow.
    async fn answer(&self, addr: Ipv4Addr, limit: Duration) -> Option<&(Duration, Vec<u16>)> {
        self.timeouts.lock().unwrap().push(limit);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let host = self.hosts.get(&addr);
        let answered = match host {
            Some((rtt, _)) => timeout(limit, sleep(*rtt)).await.is_ok(),
            None => false,
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        host.filter(|_| answered)
    }
}

#[async_trait]
impl LivenessProbe for FakeNetwork {
    async fn probe(&self, addr: Ipv4Addr, limit: Duration) -> HostProbeResult {
        self.liveness_calls.lock().unwrap().push(addr);
        match self.answer(addr, limit).await {
            Some((rtt, _)) => HostProbeResult::online(addr, *rtt),
            None => HostProbeResult::offline(addr),
        }
    }
}

#[async_trait]
impl PortProbe for FakeNetwork {
    async fn probe(&self, addr: Ipv4Addr, port: u16, limit: Duration) -> PortState {
        self.port_calls.lock().unwrap().push((addr, port));
        match self.answer(addr, limit).await {
            Some((_, open)) if open.contains(&port) => PortState::Open,
            _ => PortState::Closed,
        }
    }
}

pub fn scanner_for(network: &Arc<FakeNetwork>, config: ScanConfig) -> Scanner {
    Scanner::new(config, network.clone(), network.clone())
}

/// Observer that keeps every event it sees.
#[derive(Default)]
pub struct EventLog {
    pub phases: Mutex<Vec<ScanPhase>>,
    pub progress: Mutex<Vec<(Stage, u64, u64)>>,
    pub online: Mutex<Vec<Ipv4Addr>>,
    pub reports: Mutex<usize>,
}

impl ScanObserver for EventLog {
    fn phase_changed(&self, phase: ScanPhase) {
        self.phases.lock().unwrap().push(phase);
    }

    fn progress(&self, stage: Stage, completed: u64, total: u64) {
        self.progress.lock().unwrap().push((stage, completed, total));
    }

    fn host_online(&self, host: &HostProbeResult) {
        self.online.lock().unwrap().push(host.address());
    }

    fn report_ready(&self, _report: &sweepr_common::network::report::ScanReport) {
        *self.reports.lock().unwrap() += 1;
    }
}
