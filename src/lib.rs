//! # Trawl - a concurrent TCP connect-scan port scanner
//!
//! Trawl determines which ports on a target accept a TCP connection
//! within a bounded time, using multiple concurrent workers, and reports
//! aggregate statistics.
//!
//! ## How a scan runs
//!
//! The port range is partitioned into contiguous chunks, one per worker
//! (capped at 100). Each worker walks its chunk in ascending order,
//! attempting one timeout-bounded connect per port: a completed
//! handshake counts as open, any failure as closed. Workers keep their
//! counts local and merge them into a shared aggregator once per chunk,
//! so no lock is ever held across a connect attempt. An interrupt
//! (Ctrl-C or SIGTERM) cancels the scan early and the partial totals
//! visible at that instant are reported.
//!
//! ## Example
//!
//! ```rust,ignore
//! use trawl::scanner::{run_scan, ScanConfig};
//! use trawl::types::PortRange;
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig {
//!         target: "127.0.0.1".parse().unwrap(),
//!         ports: PortRange::new(1, 1024).unwrap(),
//!         workers: 5,
//!         attempt_timeout: Duration::from_secs(1),
//!     };
//!     let (events, _rx) = mpsc::unbounded_channel();
//!     let report = run_scan(config, events, CancellationToken::new()).await;
//!     println!("{} open ports", report.stats.open);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - validated port range and target address types
//! - [`scanner`] - partitioning, workers, aggregation, cancellation
//! - [`cli`] - argument parsing and input normalization
//! - [`output`] - live per-port display and summary formatting
//! - [`error`] - fatal input error types

pub mod cli;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, CliResult};
pub use scanner::{
    run_scan, CancellationController, PortEvent, PortState, ScanConfig, ScanReport, ScanStats,
};
pub use types::{AddrFamily, PortRange, ScanTarget};
