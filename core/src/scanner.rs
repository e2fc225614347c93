//! The central **orchestrator** for network scans.
//!
//! A [`Scanner`] walks one scan through its [`ScanPhase`]s: the target is
//! expanded into addresses, every address gets a liveness probe, every
//! online host gets a connect probe per configured port, and the merged
//! results become a [`ScanReport`].
//!
//! **Architectural Note:**
//! The scanner depends only on the [`LivenessProbe`] and [`PortProbe`]
//! abstractions. [`Scanner::with_config`] defers picking the liveness probe
//! until the first run has a valid range, so bad input never opens a raw
//! socket; tests inject in-memory fakes through [`Scanner::new`].
//!
//! Probes of a stage run in a bounded pool and return immutable values;
//! aggregation happens on the driving task only, after each stage joins.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use is_root::is_root;
use sweepr_common::config::{LivenessMethod, ScanConfig};
use sweepr_common::network::host::{HostProbeResult, HostRecord, PortScanResult, PortState};
use sweepr_common::network::range::AddressRange;
use sweepr_common::network::report::{ScanReport, ScanSummary};
use sweepr_common::network::target::Target;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ExportError, ScanError};
use crate::export;
use crate::network::icmp::IcmpProber;
use crate::network::tcp::{TcpConnectProber, TcpHandshakeProber};
use crate::network::{LivenessProbe, PortProbe};

pub mod observer;
pub mod phase;
mod pool;

use observer::{ScanObserver, Stage};
use phase::ScanPhase;
use pool::ProbePool;

/// Everything a finished scan produced.
#[derive(Debug)]
pub struct ScanOutcome {
    pub report: ScanReport,
    /// `None` when no export path was configured.
    pub export: Option<Result<PathBuf, ExportError>>,
}

struct LivenessStage {
    online: Vec<HostProbeResult>,
    probed: u64,
    total: u64,
}

struct PortStage {
    results: HashMap<Ipv4Addr, PortScanResult>,
    complete: bool,
}

/// Verdicts gathered so far for one host's port list.
struct PortTally {
    states: Vec<Option<PortState>>,
    remaining: usize,
}

impl PortTally {
    fn new(port_count: usize) -> Self {
        Self {
            states: vec![None; port_count],
            remaining: port_count,
        }
    }

    /// Returns `true` when this verdict completed the host.
    fn record(&mut self, index: usize, state: PortState) -> bool {
        match self.states.get_mut(index) {
            Some(slot @ None) => {
                *slot = Some(state);
                self.remaining -= 1;
                self.remaining == 0
            }
            _ => false,
        }
    }
}

pub struct Scanner {
    config: ScanConfig,
    /// Picked from the configuration on first use when not injected.
    liveness: Option<Arc<dyn LivenessProbe>>,
    ports: Arc<dyn PortProbe>,
    cancel: CancellationToken,
    phase: ScanPhase,
}

impl Scanner {
    pub fn new(config: ScanConfig, liveness: Arc<dyn LivenessProbe>, ports: Arc<dyn PortProbe>) -> Self {
        Self {
            config,
            liveness: Some(liveness),
            ports,
            cancel: CancellationToken::new(),
            phase: ScanPhase::Idle,
        }
    }

    /// Builds a scanner with the probes the configuration asks for.
    ///
    /// The liveness probe is opened by [`Scanner::run`] once the range is
    /// known to be valid, falling back to TCP handshakes when the ICMP
    /// socket cannot be opened.
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            config,
            liveness: None,
            ports: Arc::new(TcpConnectProber),
            cancel: CancellationToken::new(),
            phase: ScanPhase::Idle,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Token that stops the scan early. Outstanding probes are abandoned
    /// and the partial results are still reported.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs a complete scan of `input`.
    ///
    /// Only malformed input or a second call on the same scanner fail;
    /// probe failures are part of the report and export failures are
    /// returned inside the [`ScanOutcome`].
    pub async fn run(&mut self, input: &str, observer: &dyn ScanObserver) -> Result<ScanOutcome, ScanError> {
        let started: Instant = Instant::now();

        self.advance(ScanPhase::Expanding, observer)?;
        let expanded = input
            .parse::<Target>()
            .and_then(|target| Ok((target, target.expand()?)));
        let (target, range): (Target, AddressRange) = match expanded {
            Ok(expanded) => expanded,
            Err(err) => {
                self.advance(ScanPhase::Failed, observer)?;
                return Err(err.into());
            }
        };
        info!("Expanded {target} into {} addresses", range.len());

        let prober: Arc<dyn LivenessProbe> =
            Arc::clone(self.liveness.get_or_insert_with(|| select_liveness(&self.config)));

        self.advance(ScanPhase::ProbingLiveness, observer)?;
        let liveness: LivenessStage = self.probe_liveness(prober, range, observer).await;

        self.advance(ScanPhase::ProbingPorts, observer)?;
        let ports: PortStage = self.probe_ports(&liveness.online, observer).await;

        self.advance(ScanPhase::Reporting, observer)?;
        let cancelled: bool = self.cancel.is_cancelled();
        let report: ScanReport = assemble(liveness, ports, started.elapsed(), cancelled);
        observer.report_ready(&report);

        let export = self.config.output().map(|path| {
            export::write_csv(path, &report).map(|()| path.to_path_buf())
        });

        self.advance(ScanPhase::Done, observer)?;
        Ok(ScanOutcome { report, export })
    }

    fn advance(&mut self, next: ScanPhase, observer: &dyn ScanObserver) -> Result<(), ScanError> {
        if !self.phase.can_advance_to(next) {
            return Err(ScanError::IllegalTransition {
                from: self.phase,
                to: next,
            });
        }
        debug!("Scan phase: {} -> {}", self.phase, next);
        self.phase = next;
        observer.phase_changed(next);
        Ok(())
    }

    async fn probe_liveness(
        &self,
        liveness: Arc<dyn LivenessProbe>,
        range: AddressRange,
        observer: &dyn ScanObserver,
    ) -> LivenessStage {
        let total: u64 = range.len();
        observer.stage_started(Stage::Liveness, total);

        let mut online: Vec<HostProbeResult> = Vec::new();
        let mut probed: u64 = 0;
        let mut record = |result: HostProbeResult| {
            probed += 1;
            if result.is_online() {
                observer.host_online(&result);
                online.push(result);
            }
            observer.progress(Stage::Liveness, probed, total);
        };

        let mut pool: ProbePool<HostProbeResult> =
            ProbePool::new(self.config.concurrency(), self.cancel.clone());
        for addr in range {
            if self.cancel.is_cancelled() {
                break;
            }
            let prober = Arc::clone(&liveness);
            let limit: Duration = self.config.timeout();
            pool.submit(async move { prober.probe(addr, limit).await }, &mut record)
                .await;
        }
        pool.drain(&mut record).await;

        online.sort_by_key(|host| host.address());
        info!("{} of {} addresses answered", online.len(), total);

        LivenessStage {
            online,
            probed,
            total,
        }
    }

    async fn probe_ports(&self, hosts: &[HostProbeResult], observer: &dyn ScanObserver) -> PortStage {
        let total: u64 = hosts.len() as u64;
        let ports: &[u16] = self.config.ports();
        observer.stage_started(Stage::Ports, total);

        let mut tallies: HashMap<Ipv4Addr, PortTally> = hosts
            .iter()
            .map(|host| (host.address(), PortTally::new(ports.len())))
            .collect();
        let mut finished: u64 = 0;
        let mut record = |(addr, index, state): (Ipv4Addr, usize, PortState)| {
            let Some(tally) = tallies.get_mut(&addr) else {
                return;
            };
            if tally.record(index, state) {
                finished += 1;
                observer.progress(Stage::Ports, finished, total);
            }
        };

        let mut pool: ProbePool<(Ipv4Addr, usize, PortState)> =
            ProbePool::new(self.config.concurrency(), self.cancel.clone());
        'hosts: for host in hosts {
            for (index, &port) in ports.iter().enumerate() {
                if self.cancel.is_cancelled() {
                    break 'hosts;
                }
                let prober = Arc::clone(&self.ports);
                let addr: Ipv4Addr = host.address();
                let limit: Duration = self.config.timeout();
                let probe = async move { (addr, index, prober.probe(addr, port, limit).await) };
                pool.submit(probe, &mut record).await;
            }
        }
        pool.drain(&mut record).await;

        info!("Port probing finished for {finished} of {total} hosts");

        let results: HashMap<Ipv4Addr, PortScanResult> = tallies
            .into_iter()
            .map(|(addr, tally)| (addr, PortScanResult::from_states(addr, ports, &tally.states)))
            .collect();

        PortStage {
            results,
            complete: finished == total,
        }
    }
}

fn select_liveness(config: &ScanConfig) -> Arc<dyn LivenessProbe> {
    let handshake = || -> Arc<dyn LivenessProbe> {
        Arc::new(TcpHandshakeProber::new(config.ports().to_vec()))
    };

    match config.method() {
        LivenessMethod::Tcp => handshake(),
        LivenessMethod::Icmp => match IcmpProber::new() {
            Ok(prober) => Arc::new(prober),
            Err(err) => {
                let hint: &str = if is_root() { "" } else { " (raw ICMP sockets require root)" };
                warn!("Cannot open ICMP socket: {err}{hint}; using TCP handshakes for liveness");
                handshake()
            }
        },
    }
}

/// Merges both stages into the final report, ordered by address.
///
/// A probe lost to a panicked task leaves its stage incomplete without
/// marking the report interrupted; only cancellation does that.
fn assemble(liveness: LivenessStage, mut ports: PortStage, elapsed: Duration, cancelled: bool) -> ScanReport {
    let incomplete: bool = liveness.probed < liveness.total || !ports.complete;
    let summary = ScanSummary {
        probed: liveness.probed,
        total: liveness.total,
        elapsed,
        interrupted: cancelled && incomplete,
    };

    let hosts: Vec<HostRecord> = liveness
        .online
        .into_iter()
        .map(|probe| {
            let scan = ports.results.remove(&probe.address());
            HostRecord::merge(probe, scan)
        })
        .collect();

    ScanReport::new(hosts, summary)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
