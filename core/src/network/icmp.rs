//! ICMP echo liveness probe.
//!
//! Uses an unprivileged datagram ICMP socket where the kernel allows it
//! (`net.ipv4.ping_group_range` on Linux) and a raw socket otherwise, which
//! requires **root privileges**.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use surge_ping::{Client, Config, PingIdentifier, PingSequence};
use sweepr_common::network::host::HostProbeResult;
use tracing::debug;

use super::LivenessProbe;

const PAYLOAD: [u8; 56] = [0; 56];

pub struct IcmpProber {
    client: Client,
}

impl IcmpProber {
    /// Opens the ICMP socket. Must be called from within a tokio runtime.
    pub fn new() -> std::io::Result<Self> {
        let client = Client::new(&Config::default())?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LivenessProbe for IcmpProber {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> HostProbeResult {
        let mut pinger = self
            .client
            .pinger(IpAddr::V4(addr), PingIdentifier(rand::random()))
            .await;
        pinger.timeout(timeout);

        match pinger.ping(PingSequence(0), &PAYLOAD).await {
            Ok((_reply, rtt)) => {
                debug!("{addr} answered echo request in {rtt:?}");
                HostProbeResult::online(addr, rtt)
            }
            Err(err) => {
                debug!("{addr} did not answer echo request: {err}");
                HostProbeResult::offline(addr)
            }
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
