use std::io::{self, ErrorKind};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sweepr_common::network::host::{HostProbeResult, PortState};
use tokio::net::TcpStream;
use tokio::time::error::Elapsed;
use tokio::time::timeout;
use tracing::debug;

use super::{LivenessProbe, PortProbe};

/// Full TCP connect probe: a port is open when the handshake completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnectProber;

#[async_trait]
impl PortProbe for TcpConnectProber {
    async fn probe(&self, addr: Ipv4Addr, port: u16, limit: Duration) -> PortState {
        let socket_addr: SocketAddr = SocketAddr::V4(SocketAddrV4::new(addr, port));
        let outcome = timeout(limit, TcpStream::connect(socket_addr)).await;
        port_state(socket_addr, outcome)
    }
}

fn port_state<T>(socket_addr: SocketAddr, outcome: Result<io::Result<T>, Elapsed>) -> PortState {
    match outcome {
        Ok(Ok(_stream)) => PortState::Open,
        Ok(Err(err)) => {
            debug!("{socket_addr} closed: {err}");
            PortState::Closed
        }
        Err(_elapsed) => PortState::Closed,
    }
}

/// Liveness through TCP handshakes, for when ICMP sockets are unavailable.
///
/// Any answer proves the host exists: an accepted connection as well as an
/// active refusal (RST). Only silence or a routing error marks it offline.
///
/// Ports are knocked one at a time and share a single timeout, so a check
/// never holds more than one socket.
#[derive(Debug, Clone)]
pub struct TcpHandshakeProber {
    ports: Vec<u16>,
}

impl TcpHandshakeProber {
    pub fn new(ports: Vec<u16>) -> Self {
        Self { ports }
    }
}

#[async_trait]
impl LivenessProbe for TcpHandshakeProber {
    async fn probe(&self, addr: Ipv4Addr, limit: Duration) -> HostProbeResult {
        let start: Instant = Instant::now();
        let answered = timeout(limit, async {
            for &port in &self.ports {
                if knock(SocketAddrV4::new(addr, port)).await {
                    return true;
                }
            }
            false
        })
        .await;

        match answered {
            Ok(true) => HostProbeResult::online(addr, start.elapsed()),
            Ok(false) | Err(_) => HostProbeResult::offline(addr),
        }
    }
}

async fn knock(socket_addr: SocketAddrV4) -> bool {
    match TcpStream::connect(socket_addr).await {
        Ok(_) => true,
        Err(err) if err.kind() == ErrorKind::ConnectionRefused => true,
        Err(err) => {
            debug!("{socket_addr} unreachable: {err}");
            false
        }
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
