use std::process::ExitCode;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;
use colored::*;
use indicatif::ProgressStyle;
use sweepr_common::config::{Config, ScanConfig};
use sweepr_common::network::host::HostProbeResult;
use sweepr_common::network::report::ScanReport;
use sweepr_common::success;
use sweepr_core::scanner::Scanner;
use sweepr_core::scanner::observer::{ScanObserver, Stage};
use sweepr_core::scanner::phase::ScanPhase;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, debug, error, info_span, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::commands::ScanArgs;
use crate::sprint;
use crate::terminal::{colors, format, print};

/// Exit status of a scan stopped with Ctrl-C.
const EXIT_INTERRUPTED: u8 = 130;

pub async fn scan(args: ScanArgs, cfg: &Config) -> anyhow::Result<ExitCode> {
    let scan_config: ScanConfig = ScanConfig::default()
        .with_ports(args.ports)?
        .with_timeout(args.timeout)?
        .with_concurrency(args.concurrency)?
        .with_method(args.method)
        .with_output(args.output);

    let mut scanner: Scanner = Scanner::with_config(scan_config);
    let watcher = tokio::spawn(watch_interrupt(scanner.cancellation_token()));

    let span: Span = info_span!("scan", indicatif.pb_show = true);
    let reporter = ProgressReporter::new(span.clone());
    let outcome = scanner.run(&args.range, &reporter).instrument(span).await;

    watcher.abort();
    drop(reporter);

    let outcome = outcome.with_context(|| format!("cannot scan `{}`", args.range))?;
    print_report(&outcome.report, cfg);

    match &outcome.export {
        Some(Ok(path)) => success!("Report written to {}", path.display()),
        Some(Err(err)) => {
            error!("{err}");
            return Ok(ExitCode::FAILURE);
        }
        None => {}
    }

    if outcome.report.interrupted() {
        return Ok(ExitCode::from(EXIT_INTERRUPTED));
    }
    Ok(ExitCode::SUCCESS)
}

async fn watch_interrupt(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("Interrupted, reporting partial results");
        cancel.cancel();
    }
}

/// Drives the progress bar attached to the scan span.
struct ProgressReporter {
    span: Span,
    online: AtomicU64,
}

impl ProgressReporter {
    fn new(span: Span) -> Self {
        Self {
            span,
            online: AtomicU64::new(0),
        }
    }
}

impl ScanObserver for ProgressReporter {
    fn phase_changed(&self, phase: ScanPhase) {
        debug!("Entering {phase}");
    }

    fn stage_started(&self, stage: Stage, total: u64) {
        let label: &str = match stage {
            Stage::Liveness => "Sweeping",
            Stage::Ports => "Probing ports",
        };
        self.span.pb_set_style(&bar_style());
        self.span.pb_set_length(total);
        self.span.pb_set_position(0);
        self.span.pb_set_message(label);
    }

    fn progress(&self, _stage: Stage, completed: u64, _total: u64) {
        self.span.pb_set_position(completed);
    }

    fn host_online(&self, host: &HostProbeResult) {
        let count: u64 = self.online.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("{} answered", host.address());
        self.span.pb_set_message(&format!("Sweeping, {count} up"));
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg:<20} [{bar:32.green/white}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
}

fn print_report(report: &ScanReport, cfg: &Config) {
    if report.is_empty() {
        print::header("no hosts online", cfg.quiet);
        if cfg.quiet == 0 {
            print::no_results();
        }
        print_summary(report, cfg);
        return;
    }

    if cfg.quiet > 0 {
        sprint!();
    }

    print::header("scan results", cfg.quiet);
    for (idx, host) in report.hosts().iter().enumerate() {
        match cfg.quiet {
            0 | 1 => {
                print::tree_head(idx, &host.address().to_string());
                print::as_tree_one_level(format::host_details(host));
                if idx + 1 != report.hosts().len() {
                    sprint!();
                }
            }
            _ => print::print_status(format::host_line(host)),
        }
    }
    print_summary(report, cfg);
}

fn print_summary(report: &ScanReport, cfg: &Config) {
    let summary = report.summary();
    let online: ColoredString = format!("{} online", report.online_count()).bold().green();
    let offline: ColoredString = format!("{} offline", report.offline_count()).bold().red();
    let elapsed: ColoredString = format::elapsed(summary.elapsed).bold().yellow();
    let title: &str = if report.interrupted() {
        "Scan Interrupted"
    } else {
        "Scan Complete"
    };
    let output: String = format!("{title}: {online}, {offline} in {elapsed}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
            print::end_of_program();
        }
        _ => {
            sprint!();
            success!("{}", output);
        }
    }

    if report.interrupted() {
        warn!("Only {} of {} addresses were probed", summary.probed, summary.total);
    }
}
