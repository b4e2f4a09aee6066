//! Command-line surface and input normalization.
//!
//! This is the validation boundary: raw flag values are clamped and
//! checked here, and the scanner core only ever sees a well-formed
//! [`ScanOptions`]. Fatal input errors (bad address, inverted bounds)
//! surface as [`CliError`] before any worker starts.

use std::time::Duration;

use clap::Parser;

use crate::error::{CliError, CliResult};
use crate::scanner::MAX_WORKERS;
use crate::types::{PortRange, ScanTarget};

/// A concurrent TCP connect port scanner.
#[derive(Parser, Debug)]
#[command(name = "trawl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP connect port scanner", long_about = None)]
pub struct Cli {
    /// Start port
    #[arg(short = 's', value_name = "START PORT", default_value_t = 1, allow_negative_numbers = true)]
    pub start_port: i64,

    /// End port
    #[arg(short = 'e', value_name = "END PORT", default_value_t = 1024, allow_negative_numbers = true)]
    pub end_port: i64,

    /// Worker count (capped at 100)
    #[arg(short = 'c', value_name = "WORKER COUNT", default_value_t = 5)]
    pub workers: usize,

    /// Per-connection wait timeout in seconds
    #[arg(short = 'w', value_name = "WAIT TIMEOUT", default_value_t = 1)]
    pub wait_timeout: u64,

    /// Target IP address (IPv4 or IPv6 literal)
    #[arg(value_name = "IP ADDRESS")]
    pub address: String,
}

/// Scanner-ready parameters produced by [`Cli::normalize`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub target: ScanTarget,
    pub ports: PortRange,
    pub workers: usize,
    pub attempt_timeout: Duration,
    /// Notices about silently adjusted values, for display before the scan.
    pub warnings: Vec<String>,
}

impl Cli {
    /// Clamp and validate the raw flag values.
    ///
    /// Out-of-range port bounds are clamped into `[0, 65535]`; an
    /// inverted range or unparsable address is fatal. A worker count
    /// above the hard cap is lowered with a warning, and one above the
    /// number of ports is quietly reduced to the port count.
    pub fn normalize(&self) -> CliResult<ScanOptions> {
        let mut warnings = Vec::new();

        let start = clamp_port(self.start_port);
        let end = clamp_port(self.end_port);
        let ports = PortRange::new(start, end)
            .map_err(|_| CliError::PortOrder { start, end })?;

        let target = ScanTarget::parse(&self.address)
            .map_err(|_| CliError::InvalidAddress(self.address.clone()))?;

        let mut workers = self.workers.max(1);
        if workers > MAX_WORKERS {
            workers = MAX_WORKERS;
            warnings.push(format!(
                "Worker count lowered to {MAX_WORKERS} as results unpredictable when using too many"
            ));
        }
        if workers > ports.len() {
            workers = ports.len();
        }

        // Honored for every connect attempt, with a one-second floor.
        let attempt_timeout = Duration::from_secs(self.wait_timeout.max(1));

        Ok(ScanOptions {
            target,
            ports,
            workers,
            attempt_timeout,
            warnings,
        })
    }
}

/// Clamp a raw numeric flag into the valid port space.
fn clamp_port(raw: i64) -> u16 {
    raw.clamp(0, 65535) as u16
}
