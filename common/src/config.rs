use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Ports probed when the caller supplies none.
pub const DEFAULT_PORTS: [u16; 5] = [22, 80, 443, 3389, 5985];
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1_000);
/// Upper bound on probes in flight at any time.
pub const DEFAULT_CONCURRENCY: usize = 256;

/// Presentation settings of the terminal front-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Suppresses the banner.
    pub no_banner: bool,
    /// 0 prints everything, 1 hides decoration, 2 prints only the summary.
    pub quiet: u8,
}

/// How hosts are judged alive before their ports are probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LivenessMethod {
    /// ICMP echo request.
    #[default]
    Icmp,
    /// TCP handshake against the configured ports; a refusal counts as alive.
    Tcp,
}

impl FromStr for LivenessMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icmp" | "ping" => Ok(LivenessMethod::Icmp),
            "tcp" => Ok(LivenessMethod::Tcp),
            _ => Err(ConfigError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for LivenessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LivenessMethod::Icmp => "icmp",
            LivenessMethod::Tcp => "tcp",
        })
    }
}

/// Validated settings of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    ports: Vec<u16>,
    timeout: Duration,
    concurrency: usize,
    method: LivenessMethod,
    output: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ports: DEFAULT_PORTS.to_vec(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            method: LivenessMethod::default(),
            output: None,
        }
    }
}

impl ScanConfig {
    /// Replaces the port list. Duplicates are dropped, keeping the first occurrence.
    pub fn with_ports(mut self, ports: impl IntoIterator<Item = u16>) -> Result<Self, ConfigError> {
        let mut unique: Vec<u16> = Vec::new();
        for port in ports {
            if port == 0 {
                return Err(ConfigError::InvalidPort(port.to_string()));
            }
            if !unique.contains(&port) {
                unique.push(port);
            }
        }

        if unique.is_empty() {
            return Err(ConfigError::NoPorts);
        }

        self.ports = unique;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(format!("{}", timeout.as_millis())));
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self, ConfigError> {
        if concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(concurrency.to_string()));
        }
        self.concurrency = concurrency;
        Ok(self)
    }

    pub fn with_method(mut self, method: LivenessMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the CSV export destination.
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn ports(&self) -> &[u16] {
        &self.ports
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn method(&self) -> LivenessMethod {
        self.method
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
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
