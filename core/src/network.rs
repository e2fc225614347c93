//! # Probes
//!
//! The two seams through which a scan touches the network. Probes never
//! fail: transport errors, refusals and timeouts are folded into the
//! returned verdict, because an unanswered address is the common case.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::network::host::{HostProbeResult, PortState};

pub mod icmp;
pub mod tcp;

/// Decides whether a host is reachable at all.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> HostProbeResult;
}

/// Decides whether a single transport endpoint accepts connections.
#[async_trait]
pub trait PortProbe: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr, port: u16, timeout: Duration) -> PortState;
}
