#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;

use sweepr_common::config::ScanConfig;
use sweepr_core::error::ExportError;
use sweepr_core::export::read_csv;
use sweepr_core::scanner::observer::Silent;

use crate::support::{FakeNetwork, scanner_for};

#[tokio::test]
async fn scan_results_survive_csv_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sweep.csv");
    let gateway = Ipv4Addr::new(192, 168, 0, 1);
    let server = Ipv4Addr::new(192, 168, 0, 10);
    let network = Arc::new(
        FakeNetwork::default()
            .with_host(gateway, 1, &[80, 443])
            .with_host(server, 7, &[]),
    );
    let config = ScanConfig::default()
        .with_ports([80, 443, 22])?
        .with_output(Some(path.clone()));
    let mut scanner = scanner_for(&network, config);

    let outcome = scanner.run("192.168.0.0/28", &Silent).await?;

    assert_eq!(outcome.export.as_ref().map(|r| r.as_ref().ok()), Some(Some(&path)));

    let rows = read_csv(&path)?;
    assert_eq!(rows.len(), 2);
    for (row, record) in rows.iter().zip(outcome.report.hosts()) {
        assert_eq!(row.ip_address, record.address());
        assert_eq!(row.status, record.status().to_string());
        assert_eq!(row.open_ports, record.joined_ports());
        assert_eq!(row.response_time, record.round_trip_millis());
    }
    assert_eq!(rows[0].open_ports, "80, 443");
    assert_eq!(rows[1].open_ports, "");

    let raw = std::fs::read_to_string(&path)?;
    assert!(raw.starts_with("IPAddress,Status,ResponseTime,OpenPorts\n"));
    Ok(())
}

#[tokio::test]
async fn empty_scan_writes_header_only() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("empty.csv");
    let network = Arc::new(FakeNetwork::default());
    let config = ScanConfig::default().with_output(Some(path.clone()));
    let mut scanner = scanner_for(&network, config);

    scanner.run("10.9.0.0/30", &Silent).await?;

    assert_eq!(
        std::fs::read_to_string(&path)?,
        "IPAddress,Status,ResponseTime,OpenPorts\n"
    );
    assert!(read_csv(&path)?.is_empty());
    Ok(())
}

#[tokio::test]
async fn export_failure_keeps_the_report() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("no-such-dir").join("out.csv");
    let host = Ipv4Addr::new(10, 8, 0, 1);
    let network = Arc::new(FakeNetwork::default().with_host(host, 2, &[22]));
    let config = ScanConfig::default().with_output(Some(path));
    let mut scanner = scanner_for(&network, config);

    let outcome = scanner.run("10.8.0.1-10.8.0.2", &Silent).await?;

    assert!(matches!(outcome.export, Some(Err(ExportError::Write { .. }))));
    assert_eq!(outcome.report.online_count(), 1);
    assert_eq!(outcome.report.hosts()[0].open_ports(), [22]);
    Ok(())
}
