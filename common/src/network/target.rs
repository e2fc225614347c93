//! # Scan Target Model
//!
//! Parses the address-range argument of a scan. Two grammars are accepted:
//! * A CIDR block (e.g., `192.168.1.0/24`).
//! * An explicit IPv4 span (e.g., `192.168.1.1-192.168.1.254`).
//!
//! Everything else, including a bare address or a hostname, is rejected
//! with [`RangeError::InvalidFormat`].

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::RangeError;
use crate::network::range::{self, AddressRange};

/// A parsed, not yet expanded, address-range argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A network block; host bits of `addr` are ignored.
    Cidr { addr: Ipv4Addr, prefix: u8 },
    /// An explicit start-end pair, both ends inclusive.
    Span { start_addr: Ipv4Addr, end_addr: Ipv4Addr },
}

impl Target {
    /// Expands the target into the addresses it covers.
    pub fn expand(&self) -> Result<AddressRange, RangeError> {
        match *self {
            Target::Cidr { addr, prefix } => range::cidr_hosts(addr, prefix),
            Target::Span { start_addr, end_addr } => range::span(start_addr, end_addr),
        }
    }
}

impl FromStr for Target {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(target) = parse_cidr(trimmed, s)? {
            return Ok(target);
        }

        if let Some(target) = parse_span(trimmed, s)? {
            return Ok(target);
        }

        Err(RangeError::format(s, "unrecognised address range"))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Cidr { addr, prefix } => write!(f, "{addr}/{prefix}"),
            Target::Span { start_addr, end_addr } => write!(f, "{start_addr}-{end_addr}"),
        }
    }
}

/// Parses and expands an address-range argument in one step.
pub fn expand(input: &str) -> Result<AddressRange, RangeError> {
    input.parse::<Target>()?.expand()
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr(s: &str, original: &str) -> Result<Option<Target>, RangeError> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let addr = parse_addr(ip_str, original)?;

    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::format(
            original,
            format!("prefix `{prefix_str}` is not a number"),
        ));
    }

    let prefix = match prefix_str.parse::<u8>() {
        Ok(prefix) if prefix <= 32 => prefix,
        _ => {
            return Err(RangeError::format(
                original,
                format!("prefix /{prefix_str} is out of range (0-32)"),
            ));
        }
    };

    Ok(Some(Target::Cidr { addr, prefix }))
}

/// Parses a span like "10.0.0.1-10.0.0.50".
fn parse_span(s: &str, original: &str) -> Result<Option<Target>, RangeError> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Ok(None);
    };

    let start_addr = parse_addr(start_str, original)?;
    let end_addr = parse_addr(end_str, original)?;

    Ok(Some(Target::Span { start_addr, end_addr }))
}

fn parse_addr(s: &str, original: &str) -> Result<Ipv4Addr, RangeError> {
    s.parse::<Ipv4Addr>()
        .map_err(|_| RangeError::format(original, format!("`{s}` is not a dotted-quad IPv4 address")))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
