use std::io::{self, BufWriter, ErrorKind, Write};
use std::process::ExitCode;

use anyhow::Context;
use sweepr_common::network::range::AddressRange;
use sweepr_common::network::target;
use tracing::info;

/// Prints every address of `range` to stdout, one per line.
pub fn list(range: &str) -> anyhow::Result<ExitCode> {
    let addresses: AddressRange = target::expand(range).with_context(|| format!("cannot expand `{range}`"))?;
    info!("{} expands to {} addresses", range.trim(), addresses.len());

    let mut out = BufWriter::new(io::stdout().lock());
    match write_addresses(&mut out, addresses) {
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(ExitCode::SUCCESS),
        result => {
            result.context("cannot write to stdout")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn write_addresses(out: &mut impl Write, addresses: AddressRange) -> io::Result<()> {
    for addr in addresses {
        writeln!(out, "{addr}")?;
    }
    out.flush()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
