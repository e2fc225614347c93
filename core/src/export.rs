//! CSV persistence for scan reports.
//!
//! One row per online host with the columns
//! `IPAddress,Status,ResponseTime,OpenPorts`. The header is written even
//! when the report has no rows.

use std::io;
use std::net::Ipv4Addr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sweepr_common::network::host::HostRecord;
use sweepr_common::network::report::ScanReport;
use tracing::info;

use crate::error::ExportError;

pub const CSV_HEADERS: [&str; 4] = ["IPAddress", "Status", "ResponseTime", "OpenPorts"];

/// A single CSV row. `response_time` is in milliseconds and empty when
/// no round trip was measured; `open_ports` is joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "IPAddress")]
    pub ip_address: Ipv4Addr,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "ResponseTime")]
    pub response_time: Option<u64>,
    #[serde(rename = "OpenPorts")]
    pub open_ports: String,
}

impl From<&HostRecord> for CsvRow {
    fn from(record: &HostRecord) -> Self {
        Self {
            ip_address: record.address(),
            status: record.status().to_string(),
            response_time: record.round_trip_millis(),
            open_ports: record.joined_ports(),
        }
    }
}

pub fn write_records<W: io::Write>(writer: W, report: &ScanReport) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(CSV_HEADERS)?;
    for record in report.hosts() {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `report` to `path`, replacing any existing file.
pub fn write_csv(path: &Path, report: &ScanReport) -> Result<(), ExportError> {
    let to_error = |source: csv::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(|err| to_error(err.into()))?;
    write_records(file, report).map_err(to_error)?;

    info!("Wrote {} rows to {}", report.hosts().len(), path.display());
    Ok(())
}

pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<CsvRow>, csv::Error> {
    csv::Reader::from_reader(reader).deserialize().collect()
}

pub fn read_csv(path: &Path) -> Result<Vec<CsvRow>, ExportError> {
    let to_error = |source: csv::Error| ExportError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|err| to_error(err.into()))?;
    read_records(file).map_err(to_error)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
