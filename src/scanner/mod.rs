//! Scanner module - partitions the range, runs workers, aggregates tallies.
//!
//! `run_scan` is the orchestrator: it slices the port range into chunks,
//! launches one tokio task per chunk, and waits for either every worker
//! to finish or the cancellation token to fire. Either way it returns a
//! report built from an aggregator snapshot, so an interrupted scan
//! still yields valid (partial) totals.

pub mod aggregate;
pub mod cancel;
pub mod partition;
pub mod worker;

pub use aggregate::{Aggregator, ScanStats, WorkerTally};
pub use cancel::{CancelState, CancellationController};
pub use partition::{partition, WorkChunk};
pub use worker::ScanWorker;

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::types::PortRange;

/// Hard cap on concurrent workers, regardless of what was requested.
pub const MAX_WORKERS: usize = 100;

/// Two-state classification of a probed port.
///
/// There is deliberately no filtered/unknown state: any connect failure,
/// whatever its cause, maps to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Open,
    Closed,
}

impl PortState {
    /// Check if the port accepted the handshake.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Live-display notification for one classified port.
///
/// A reporting side channel only; the tallies are authoritative.
#[derive(Debug, Clone, Copy)]
pub struct PortEvent {
    pub port: u16,
    pub state: PortState,
    pub worker: usize,
}

/// Configuration for a scan run, assembled from validated input.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Target address.
    pub target: IpAddr,
    /// Ports to scan.
    pub ports: PortRange,
    /// Requested worker count; capped at [`MAX_WORKERS`] and at the
    /// range size before partitioning.
    pub workers: usize,
    /// Bound on each individual connect attempt.
    pub attempt_timeout: Duration,
}

/// Final (or partial, when interrupted) outcome of a scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanReport {
    pub stats: ScanStats,
    pub interrupted: bool,
}

/// Execute a complete scan.
///
/// Launches one worker per chunk; each worker merges its tally into the
/// shared aggregator when its chunk is done. Returns as soon as either
/// all workers finish or `cancel` fires. On cancellation, in-flight
/// workers are not waited on: whatever totals are visible at that
/// instant become the report, and ports never attempted stay uncounted.
pub async fn run_scan(
    config: ScanConfig,
    events: mpsc::UnboundedSender<PortEvent>,
    cancel: CancellationToken,
) -> ScanReport {
    let chunks = partition(config.ports, config.workers.min(MAX_WORKERS));
    debug!(
        target = %config.target,
        ports = %config.ports,
        workers = chunks.len(),
        "starting scan"
    );

    let aggregator = Arc::new(Aggregator::new());

    let mut handles = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let worker = ScanWorker::new(config.target, config.attempt_timeout);
        let aggregator = Arc::clone(&aggregator);
        let events = events.clone();
        let cancel = cancel.clone();
        handles.push(tokio::spawn(async move {
            let tally = worker.scan_chunk(chunk, &events, &cancel).await;
            aggregator.merge(tally);
        }));
    }

    tokio::select! {
        // Check cancellation first so a pending interrupt always wins.
        biased;
        _ = cancel.cancelled() => ScanReport {
            stats: aggregator.snapshot(),
            interrupted: true,
        },
        results = join_all(handles) => {
            for result in results {
                // Workers absorb all per-port failures; a join error here
                // would mean a panic escaped one, which we only log.
                if let Err(e) = result {
                    debug!(error = %e, "worker task failed");
                }
            }
            ScanReport {
                stats: aggregator.snapshot(),
                interrupted: false,
            }
        }
    }
}
