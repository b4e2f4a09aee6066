//! Terminal output: scan header, live per-port lines, and the summary.
//!
//! The live display overwrites closed-port lines in place (closed ports
//! vastly outnumber open ones) while open ports keep a persistent line.
//! Everything here is display only; printing failures are swallowed so
//! a broken pipe can never fail a scan.

use std::io::{self, Write};

use console::style;

use crate::scanner::{PortEvent, PortState, ScanStats};
use crate::types::{PortRange, ScanTarget};

/// Clear the current line and return the cursor to column one.
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Render the final (or partial) summary line.
///
/// Pure formatting: elapsed time is reported in whole seconds, and the
/// scanned total is simply `open + closed`.
pub fn summary(stats: &ScanStats) -> String {
    format!(
        "{} Open port(s). Scanned {} ports in {} seconds.",
        stats.open,
        stats.total_scanned(),
        stats.elapsed.as_secs()
    )
}

/// Print the banner line shown before scanning starts.
pub fn print_scan_header(target: &ScanTarget, ports: &PortRange) {
    println!(
        "TCP Connect Port Scanning {} ({}) Ports {} - {}\n",
        style(target.ip()).bold(),
        target.family(),
        ports.start(),
        ports.end()
    );
}

/// Print one live port classification.
pub fn print_port_event(event: &PortEvent) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = match event.state {
        PortState::Open => writeln!(
            out,
            "{CLEAR_LINE}Port {} {}",
            event.port,
            style("open").green().bold()
        ),
        PortState::Closed => write!(
            out,
            "{CLEAR_LINE}Port {} closed (worker: {})",
            event.port, event.worker
        ),
    };
    let _ = out.flush();
}

/// Print the summary, clearing any leftover in-place status line first.
pub fn print_summary(stats: &ScanStats) {
    println!("{CLEAR_LINE}\n{}", summary(stats));
}

/// Print the notice shown when the scan is interrupted.
pub fn print_cancelled() {
    println!("\n\nPort scan cancelled");
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
