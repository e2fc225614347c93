//! Parsers for the scan options typed on the command line.
//!
//! Each returns a [`ConfigError`] so the front-end can hand them straight to
//! its argument parser.

use std::time::Duration;

use crate::config::LivenessMethod;
use crate::error::ConfigError;

/// Parses a single port number in `1..=65535`.
pub fn parse_port(s: &str) -> Result<u16, ConfigError> {
    match s.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(s.to_string())),
    }
}

/// Parses a timeout expressed in whole milliseconds.
pub fn parse_timeout(s: &str) -> Result<Duration, ConfigError> {
    match s.trim().parse::<u64>() {
        Ok(millis) if millis > 0 => Ok(Duration::from_millis(millis)),
        _ => Err(ConfigError::InvalidTimeout(s.to_string())),
    }
}

pub fn parse_concurrency(s: &str) -> Result<usize, ConfigError> {
    match s.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ConfigError::InvalidConcurrency(s.to_string())),
    }
}

pub fn parse_method(s: &str) -> Result<LivenessMethod, ConfigError> {
    s.parse()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
