mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, list, scan};
use sweepr_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet)?;

    let cfg = Config {
        no_banner: commands.no_banner,
        quiet: commands.quiet,
    };
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Scan(args) => {
            print::header("starting scan", cfg.quiet);
            scan::scan(args, &cfg).await
        }
        Commands::List { range } => list::list(&range),
    }
}
