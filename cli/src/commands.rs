pub mod list;
pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use sweepr_common::config::{DEFAULT_CONCURRENCY, DEFAULT_PORTS, LivenessMethod};
use sweepr_common::utils::parse;

#[derive(Parser)]
#[command(name = "sweepr", version)]
#[command(about = "Sweeps IPv4 ranges for live hosts and open ports.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print less; repeat to print only the summary
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Print more log output; repeat for trace output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Skip the start-up banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe a range for live hosts, then probe their ports
    #[command(alias = "s")]
    Scan(ScanArgs),
    /// Print every address a range expands to, without probing
    #[command(alias = "l")]
    List { range: String },
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// CIDR block (192.168.1.0/24) or start-end range (10.0.0.1-10.0.0.50)
    pub range: String,

    /// Comma separated ports probed on every live host
    #[arg(short, long, value_delimiter = ',', value_parser = parse::parse_port, default_values_t = DEFAULT_PORTS)]
    pub ports: Vec<u16>,

    /// Per-probe timeout in milliseconds
    #[arg(short, long, value_parser = parse::parse_timeout, default_value = "1000")]
    pub timeout: Duration,

    /// Write the results as CSV to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of probes in flight
    #[arg(short, long, value_parser = parse::parse_concurrency, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Liveness check: icmp (needs raw sockets) or tcp
    #[arg(short, long, value_parser = parse::parse_method, default_value_t = LivenessMethod::Icmp)]
    pub method: LivenessMethod,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
