//! # IPv4 Address Range Model
//!
//! A continuous, inclusive run of IPv4 addresses. Ranges are iterated lazily
//! so that expanding a `/8` never allocates sixteen million addresses.
//!
//! Ranges are produced by [`crate::network::target::Target::expand`].

use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::RangeError;

/// An ordered, deduplicated run of IPv4 addresses, both ends inclusive.
///
/// A range whose start lies above its end is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl AddressRange {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    fn from_bounds(start: u32, end: u32) -> Self {
        Self::new(Ipv4Addr::from(start), Ipv4Addr::from(end))
    }

    /// Number of addresses covered, which can exceed `u32::MAX` by one for `0.0.0.0/0`.
    pub fn len(&self) -> u64 {
        let start: u64 = u64::from(u32::from(self.start_addr));
        let end: u64 = u64::from(u32::from(self.end_addr));
        if start > end { 0 } else { end - start + 1 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Addresses in ascending numeric order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }
}

impl IntoIterator for AddressRange {
    type Item = Ipv4Addr;
    type IntoIter = std::iter::Map<std::ops::RangeInclusive<u32>, fn(u32) -> Ipv4Addr>;

    fn into_iter(self) -> Self::IntoIter {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(<Ipv4Addr as From<u32>>::from as fn(u32) -> Ipv4Addr)
    }
}

/// Returns the usable host addresses of the block `ip/prefix`.
///
/// Network and broadcast addresses are excluded for prefixes up to `/30`.
/// A `/31` keeps both of its addresses (point-to-point link, RFC 3021) and
/// a `/32` keeps its single address.
pub fn cidr_hosts(ip: Ipv4Addr, prefix: u8) -> Result<AddressRange, RangeError> {
    let network = Ipv4Network::new(ip, prefix).map_err(|_| {
        RangeError::format(
            &format!("{ip}/{prefix}"),
            format!("prefix /{prefix} is out of range (0-32)"),
        )
    })?;

    let first: u32 = u32::from(network.network());
    let last: u32 = u32::from(network.broadcast());

    match prefix {
        31 | 32 => Ok(AddressRange::from_bounds(first, last)),
        _ => Ok(AddressRange::from_bounds(first + 1, last - 1)),
    }
}

/// Returns every address from `start` to `end`, both included.
pub fn span(start: Ipv4Addr, end: Ipv4Addr) -> Result<AddressRange, RangeError> {
    if start > end {
        return Err(RangeError::InvalidRange { start, end });
    }
    Ok(AddressRange::new(start, end))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
