use std::path::PathBuf;

use sweepr_common::error::RangeError;
use thiserror::Error;

use crate::scanner::phase::ScanPhase;

/// Errors that abort a scan before any result is produced.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error("scan cannot move from {from} to {to}")]
    IllegalTransition { from: ScanPhase, to: ScanPhase },
}

/// Errors raised while writing or reading a CSV report.
///
/// An export failure never invalidates the scan it was meant to persist.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to read report from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
