//! Binary entry point: wire the CLI, cancellation, live display, and
//! scanner together, and map outcomes to exit codes.
//!
//! Exit status is 0 on normal completion, on interrupt (partial results
//! are still a successful run), and for `--help`/`--version`; 1 on any
//! invalid input.

use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use trawl::cli::Cli;
use trawl::output;
use trawl::scanner::{self, CancellationController, ScanConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap renders its own message/usage. Help and version are
            // success paths; every input failure exits 1, including
            // missing arguments.
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    };

    if let Err(e) = run(cli).await {
        output::print_error(&format!("{e:#}"));
        process::exit(1);
    }
}

/// Validate the input and drive the scan to a printed summary.
async fn run(cli: Cli) -> Result<()> {
    let options = cli.normalize()?;
    for warning in &options.warnings {
        output::print_warning(warning);
    }

    output::print_scan_header(&options.target, &options.ports);

    let controller = CancellationController::new();
    controller.arm();

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            output::print_port_event(&event);
        }
    });

    let config = ScanConfig {
        target: options.target.ip(),
        ports: options.ports,
        workers: options.workers,
        attempt_timeout: options.attempt_timeout,
    };
    let report = scanner::run_scan(config, events_tx, controller.token()).await;

    if report.interrupted {
        // Best-effort termination: don't wait for in-flight workers or
        // their queued events, just report what was counted.
        printer.abort();
        output::print_cancelled();
    } else {
        // All senders are gone once run_scan returns, so the printer
        // drains the channel and stops on its own.
        let _ = printer.await;
    }

    output::print_summary(&report.stats);
    Ok(())
}
