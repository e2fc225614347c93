#![cfg(test)]
//! Scans against real sockets on 127.0.0.1.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use sweepr_common::config::{LivenessMethod, ScanConfig};
use sweepr_core::network::tcp::{TcpConnectProber, TcpHandshakeProber};
use sweepr_core::scanner::Scanner;
use sweepr_core::scanner::observer::Silent;
use tokio::net::TcpListener;

async fn listening_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[tokio::test]
async fn loopback_scan_finds_listener() {
    let (_open, open_port) = listening_port().await;
    let (closed, closed_port) = listening_port().await;
    drop(closed);

    let ports = vec![open_port, closed_port];
    let config = ScanConfig::default()
        .with_ports(ports.clone())
        .unwrap()
        .with_timeout(Duration::from_millis(500))
        .unwrap();
    let mut scanner = Scanner::new(
        config,
        Arc::new(TcpHandshakeProber::new(ports)),
        Arc::new(TcpConnectProber),
    );

    let outcome = scanner.run("127.0.0.1/32", &Silent).await.unwrap();

    let hosts = outcome.report.hosts();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].address(), Ipv4Addr::LOCALHOST);
    assert!(hosts[0].round_trip_millis().is_some());
    assert_eq!(hosts[0].open_ports(), [open_port]);
}

#[tokio::test]
async fn tcp_method_builds_working_scanner() {
    let (_open, open_port) = listening_port().await;
    let config = ScanConfig::default()
        .with_ports([open_port])
        .unwrap()
        .with_method(LivenessMethod::Tcp);
    let mut scanner = Scanner::with_config(config);

    let outcome = scanner.run("127.0.0.1-127.0.0.1", &Silent).await.unwrap();

    assert_eq!(outcome.report.online_count(), 1);
    assert_eq!(outcome.report.hosts()[0].open_ports(), [open_port]);
}

/// Needs permission to open ICMP sockets.
#[tokio::test]
#[ignore]
async fn icmp_scan_of_loopback() {
    let mut scanner = Scanner::with_config(ScanConfig::default());
    let outcome = scanner.run("127.0.0.1/32", &Silent).await.unwrap();
    assert_eq!(outcome.report.online_count(), 1);
}
