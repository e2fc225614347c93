//! # sweepr core
//!
//! Probing and orchestration. The [`scanner`] module drives a scan through
//! its phases, the [`network`] module holds the concrete probes and
//! [`export`] writes finished reports to CSV.

pub mod error;
pub mod export;
pub mod network;
pub mod scanner;
