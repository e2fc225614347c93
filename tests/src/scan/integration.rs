#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use sweepr_common::config::ScanConfig;
use sweepr_common::error::RangeError;
use sweepr_common::network::host::HostStatus;
use sweepr_core::error::ScanError;
use sweepr_core::scanner::observer::{Silent, Stage};
use sweepr_core::scanner::phase::ScanPhase;

use crate::support::{EventLog, FakeNetwork, scanner_for};

fn ports(list: &[u16]) -> ScanConfig {
    ScanConfig::default().with_ports(list.iter().copied()).unwrap()
}

/// Nothing answers in a /30, so the report is empty but complete.
#[tokio::test]
async fn silent_block_reports_no_hosts() {
    let network = Arc::new(FakeNetwork::default());
    let mut scanner = scanner_for(&network, ScanConfig::default());

    let outcome = scanner.run("192.168.1.0/30", &Silent).await.unwrap();

    assert_eq!(
        network.liveness_calls(),
        vec![Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(192, 168, 1, 2)]
    );
    assert!(network.port_calls().is_empty());
    assert_eq!(outcome.report.online_count(), 0);
    assert_eq!(outcome.report.offline_count(), 2);
    assert!(!outcome.report.interrupted());
    assert_eq!(scanner.phase(), ScanPhase::Done);
}

#[tokio::test]
async fn only_the_live_host_is_reported() {
    let web = Ipv4Addr::new(10, 0, 0, 1);
    let network = Arc::new(FakeNetwork::default().with_host(web, 4, &[80]));
    let mut scanner = scanner_for(&network, ports(&[80, 443]));

    let outcome = scanner.run("10.0.0.1-10.0.0.3", &Silent).await.unwrap();

    let hosts = outcome.report.hosts();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].address(), web);
    assert_eq!(hosts[0].status(), HostStatus::Online);
    assert_eq!(hosts[0].round_trip_millis(), Some(4));
    assert_eq!(hosts[0].open_ports(), [80]);
    assert_eq!(network.port_calls(), vec![(web, 80), (web, 443)]);
}

#[tokio::test]
async fn oversized_prefix_fails_before_probing() {
    let network = Arc::new(FakeNetwork::default());
    let log = EventLog::default();
    let mut scanner = scanner_for(&network, ScanConfig::default());

    let err = scanner.run("192.168.1.0/40", &log).await.unwrap_err();

    assert!(matches!(err, ScanError::Range(RangeError::InvalidFormat { .. })));
    assert!(network.liveness_calls().is_empty());
    assert_eq!(*log.phases.lock().unwrap(), vec![ScanPhase::Expanding, ScanPhase::Failed]);
    assert_eq!(*log.reports.lock().unwrap(), 0);
}

#[tokio::test]
async fn reversed_span_is_rejected() {
    let network = Arc::new(FakeNetwork::default());
    let mut scanner = scanner_for(&network, ScanConfig::default());

    let err = scanner.run("10.0.0.9-10.0.0.1", &Silent).await.unwrap_err();

    assert!(matches!(err, ScanError::Range(RangeError::InvalidRange { .. })));
    assert_eq!(scanner.phase(), ScanPhase::Failed);
}

#[tokio::test]
async fn live_host_without_open_ports_keeps_empty_list() {
    let host = Ipv4Addr::new(172, 16, 0, 5);
    let network = Arc::new(FakeNetwork::default().with_host(host, 1, &[]));
    let mut scanner = scanner_for(&network, ports(&[22, 3389]));

    let outcome = scanner.run("172.16.0.4-172.16.0.6", &Silent).await.unwrap();

    let hosts = outcome.report.hosts();
    assert_eq!(hosts.len(), 1);
    assert!(hosts[0].open_ports().is_empty());
    assert_eq!(hosts[0].joined_ports(), "");
}

#[tokio::test]
async fn report_is_sorted_and_ports_keep_order() {
    let low = Ipv4Addr::new(10, 1, 0, 2);
    let high = Ipv4Addr::new(10, 1, 0, 200);
    let network = Arc::new(
        FakeNetwork::default()
            .with_host(high, 9, &[5985, 22])
            .with_host(low, 2, &[443, 22]),
    );
    let config = ports(&[443, 22, 5985]).with_concurrency(3).unwrap();
    let mut scanner = scanner_for(&network, config);

    let outcome = scanner.run("10.1.0.0/24", &Silent).await.unwrap();

    let hosts = outcome.report.hosts();
    assert_eq!(hosts.iter().map(|h| h.address()).collect::<Vec<_>>(), vec![low, high]);
    assert_eq!(hosts[0].open_ports(), [443, 22]);
    assert_eq!(hosts[1].open_ports(), [22, 5985]);
    assert_eq!(outcome.report.summary().probed, 254);
}

#[tokio::test]
async fn observer_sees_every_completion() {
    let host = Ipv4Addr::new(10, 2, 0, 1);
    let network = Arc::new(FakeNetwork::default().with_host(host, 1, &[80]));
    let log = EventLog::default();
    let mut scanner = scanner_for(&network, ports(&[80, 443]));

    scanner.run("10.2.0.0/29", &log).await.unwrap();

    let progress = log.progress.lock().unwrap().clone();
    let liveness: Vec<u64> = progress
        .iter()
        .filter(|(stage, _, _)| *stage == Stage::Liveness)
        .map(|(_, completed, _)| *completed)
        .collect();
    assert_eq!(liveness, (1..=6).collect::<Vec<u64>>());
    assert!(progress.contains(&(Stage::Ports, 1, 1)));
    assert_eq!(*log.online.lock().unwrap(), vec![host]);
    assert_eq!(*log.reports.lock().unwrap(), 1);
    assert_eq!(log.phases.lock().unwrap().last(), Some(&ScanPhase::Done));
}

#[tokio::test]
async fn single_address_blocks() {
    let host = Ipv4Addr::new(10, 3, 0, 7);
    let network = Arc::new(FakeNetwork::default().with_host(host, 1, &[22]));

    let mut scanner = scanner_for(&network, ScanConfig::default());
    let outcome = scanner.run("10.3.0.7/32", &Silent).await.unwrap();
    assert_eq!(outcome.report.online_count(), 1);

    let mut scanner = scanner_for(&network, ScanConfig::default());
    let outcome = scanner.run("10.3.0.6/31", &Silent).await.unwrap();
    assert_eq!(outcome.report.summary().total, 2);
    assert_eq!(outcome.report.online_count(), 1);
}

#[tokio::test]
async fn cancelled_before_start_skips_probing() {
    let network = Arc::new(FakeNetwork::default().with_host(Ipv4Addr::new(10, 4, 0, 1), 1, &[80]));
    let mut scanner = scanner_for(&network, ScanConfig::default());
    scanner.cancellation_token().cancel();

    let outcome = scanner.run("10.4.0.0/24", &Silent).await.unwrap();

    assert!(outcome.report.interrupted());
    assert!(outcome.report.is_empty());
    assert!(network.liveness_calls().is_empty());
    assert!(network.port_calls().is_empty());
    assert_eq!(scanner.phase(), ScanPhase::Done);
}

#[tokio::test]
async fn configured_timeout_reaches_every_call() {
    let limit = Duration::from_millis(250);
    let host = Ipv4Addr::new(10, 5, 0, 2);
    let network = Arc::new(FakeNetwork::default().with_host(host, 1, &[22]));
    let config = ports(&[22, 80]).with_timeout(limit).unwrap();
    let mut scanner = scanner_for(&network, config);

    scanner.run("10.5.0.1-10.5.0.3", &Silent).await.unwrap();

    let timeouts = network.timeouts();
    assert_eq!(timeouts.len(), 3 + 2);
    assert!(timeouts.iter().all(|seen| *seen == limit), "{timeouts:?}");
}

#[tokio::test(start_paused = true)]
async fn host_slower_than_timeout_is_offline() {
    let fast = Ipv4Addr::new(10, 6, 0, 1);
    let slow = Ipv4Addr::new(10, 6, 0, 2);
    let network = Arc::new(
        FakeNetwork::default()
            .with_host(fast, 20, &[80])
            .with_host(slow, 2_000, &[80]),
    );
    let config = ports(&[80]).with_timeout(Duration::from_millis(500)).unwrap();
    let mut scanner = scanner_for(&network, config);

    let outcome = scanner.run("10.6.0.1-10.6.0.2", &Silent).await.unwrap();

    let hosts = outcome.report.hosts();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].address(), fast);
    assert_eq!(hosts[0].round_trip_millis(), Some(20));
    assert_eq!(network.port_calls(), vec![(fast, 80)]);
    assert_eq!(outcome.report.offline_count(), 1);
    assert!(!outcome.report.interrupted());
}

#[tokio::test(start_paused = true)]
async fn single_slot_keeps_one_call_in_flight() {
    let network = Arc::new(
        FakeNetwork::default()
            .with_host(Ipv4Addr::new(10, 7, 0, 1), 30, &[22, 443])
            .with_host(Ipv4Addr::new(10, 7, 0, 2), 30, &[80]),
    );
    let config = ports(&[22, 80, 443, 3389, 5985]).with_concurrency(1).unwrap();
    let mut scanner = scanner_for(&network, config);

    let outcome = scanner.run("10.7.0.1-10.7.0.2", &Silent).await.unwrap();

    assert_eq!(outcome.report.online_count(), 2);
    assert_eq!(network.port_calls().len(), 10);
    assert_eq!(network.peak_in_flight(), 1);
}

#[tokio::test(start_paused = true)]
async fn wider_pool_overlaps_calls_up_to_its_bound() {
    let mut network = FakeNetwork::default();
    for last in 1..=8 {
        network = network.with_host(Ipv4Addr::new(10, 8, 1, last), 30, &[]);
    }
    let network = Arc::new(network);
    let config = ports(&[22, 80]).with_concurrency(3).unwrap();
    let mut scanner = scanner_for(&network, config);

    scanner.run("10.8.1.1-10.8.1.8", &Silent).await.unwrap();

    assert_eq!(network.peak_in_flight(), 3);
}
