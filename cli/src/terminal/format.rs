use std::time::Duration;

use crate::terminal::colors;
use colored::*;
use sweepr_common::network::host::HostRecord;

type Detail = (String, ColoredString);

pub fn round_trip(millis: Option<u64>) -> ColoredString {
    match millis {
        Some(ms) => format!("{ms} ms").normal(),
        None => "unknown".color(colors::NO_DATA),
    }
}

pub fn open_ports(ports: &[u16]) -> ColoredString {
    if ports.is_empty() {
        return "none".color(colors::NO_DATA);
    }
    ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<String>>()
        .join(", ")
        .color(colors::OPEN_PORT)
}

pub fn host_details(host: &HostRecord) -> Vec<Detail> {
    vec![
        ("IPv4".to_string(), host.address().to_string().color(colors::IPV4_ADDR)),
        ("Status".to_string(), host.status().to_string().green()),
        ("RTT".to_string(), round_trip(host.round_trip_millis())),
        ("Ports".to_string(), open_ports(host.open_ports())),
    ]
}

/// Single-line rendering used when host trees are suppressed.
pub fn host_line(host: &HostRecord) -> String {
    format!(
        "{} {} {}",
        host.address().to_string().color(colors::IPV4_ADDR),
        round_trip(host.round_trip_millis()),
        open_ports(host.open_ports())
    )
}

pub fn elapsed(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
