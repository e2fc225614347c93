//! # sweepr common
//!
//! Types shared by every crate of the workspace: the address range model,
//! probe results and the final scan report, scan configuration and the
//! errors raised while validating user input.
//!
//! Nothing in here touches the network.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod utils;

#[doc(hidden)]
pub use tracing;
