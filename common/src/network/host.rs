use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Reachability verdict of a single liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostStatus {
    Online,
    Offline,
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HostStatus::Online => "Online",
            HostStatus::Offline => "Offline",
        })
    }
}

/// Outcome of one liveness probe. Offline hosts never carry a round-trip time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProbeResult {
    address: Ipv4Addr,
    round_trip_millis: Option<u64>,
    status: HostStatus,
}

impl HostProbeResult {
    pub fn online(address: Ipv4Addr, round_trip: Duration) -> Self {
        Self {
            address,
            round_trip_millis: Some(u64::try_from(round_trip.as_millis()).unwrap_or(u64::MAX)),
            status: HostStatus::Online,
        }
    }

    pub fn offline(address: Ipv4Addr) -> Self {
        Self {
            address,
            round_trip_millis: None,
            status: HostStatus::Offline,
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn status(&self) -> HostStatus {
        self.status
    }

    pub fn is_online(&self) -> bool {
        self.status == HostStatus::Online
    }

    pub fn round_trip_millis(&self) -> Option<u64> {
        self.round_trip_millis
    }
}

/// State of a single port after a connect probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortState {
    Open,
    Closed,
}

/// Open ports of one online host, in the order the ports were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortScanResult {
    address: Ipv4Addr,
    open_ports: Vec<u16>,
}

impl PortScanResult {
    pub fn new(address: Ipv4Addr, open_ports: Vec<u16>) -> Self {
        Self {
            address,
            open_ports,
        }
    }

    /// Keeps the ports whose state is open, preserving the order of `ports`.
    ///
    /// `states[i]` is the verdict for `ports[i]`; a missing verdict counts as closed.
    pub fn from_states(address: Ipv4Addr, ports: &[u16], states: &[Option<PortState>]) -> Self {
        let open_ports: Vec<u16> = ports
            .iter()
            .zip(states)
            .filter(|(_, state)| matches!(state, Some(PortState::Open)))
            .map(|(port, _)| *port)
            .collect();

        Self::new(address, open_ports)
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn open_ports(&self) -> &[u16] {
        &self.open_ports
    }
}

/// The merged per-host line of a scan report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    address: Ipv4Addr,
    status: HostStatus,
    round_trip_millis: Option<u64>,
    open_ports: Vec<u16>,
}

impl HostRecord {
    /// Merges a liveness verdict with the port results gathered for the same host.
    pub fn merge(probe: HostProbeResult, ports: Option<PortScanResult>) -> Self {
        let open_ports: Vec<u16> = ports
            .filter(|scan| scan.address == probe.address())
            .map(|scan| scan.open_ports)
            .unwrap_or_default();

        Self {
            address: probe.address(),
            status: probe.status(),
            round_trip_millis: probe.round_trip_millis(),
            open_ports,
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn status(&self) -> HostStatus {
        self.status
    }

    pub fn round_trip_millis(&self) -> Option<u64> {
        self.round_trip_millis
    }

    pub fn open_ports(&self) -> &[u16] {
        &self.open_ports
    }

    /// Open ports joined with `", "`, empty when none are open.
    pub fn joined_ports(&self) -> String {
        self.open_ports
            .iter()
            .map(u16::to_string)
            .collect::<Vec<String>>()
            .join(", ")
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
