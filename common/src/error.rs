use std::net::Ipv4Addr;

use thiserror::Error;

/// The two grammars accepted for an address range.
pub const EXPECTED_RANGE_PATTERN: &str = "`A.B.C.D/N` or `A.B.C.D-E.F.G.H`";

/// Errors raised while turning user input into an address range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("invalid range `{input}`: {reason} (expected {EXPECTED_RANGE_PATTERN})")]
    InvalidFormat { input: String, reason: String },
    #[error("invalid range `{start}-{end}`: start address is greater than end address")]
    InvalidRange { start: Ipv4Addr, end: Ipv4Addr },
}

impl RangeError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while validating scan options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("port `{0}` is invalid (expected a number between 1 and 65535)")]
    InvalidPort(String),
    #[error("the port list cannot be empty")]
    NoPorts,
    #[error("timeout `{0}` is invalid (expected a positive number of milliseconds)")]
    InvalidTimeout(String),
    #[error("concurrency `{0}` is invalid (expected a positive number)")]
    InvalidConcurrency(String),
    #[error("liveness method `{0}` is unknown (expected `icmp` or `tcp`)")]
    InvalidMethod(String),
}
