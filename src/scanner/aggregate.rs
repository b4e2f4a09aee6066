//! Tally aggregation shared across workers.
//!
//! Workers keep their counts local while scanning and merge them here
//! exactly once per chunk, so no lock is ever held across a connect
//! attempt. Merging is a plain sum: commutative and associative, the
//! arrival order of tallies cannot change the result.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::scanner::PortState;

/// A worker's local open/closed counts for its chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerTally {
    pub open: u64,
    pub closed: u64,
}

impl WorkerTally {
    /// Count one classified port.
    pub fn record(&mut self, state: PortState) {
        match state {
            PortState::Open => self.open += 1,
            PortState::Closed => self.closed += 1,
        }
    }

    /// Total ports counted by this worker.
    pub const fn total(&self) -> u64 {
        self.open + self.closed
    }
}

/// A consistent snapshot of scan totals, valid at any instant.
///
/// After an interrupted scan, `total_scanned()` may be less than the
/// range size: ports whose attempt was in flight or never started are
/// counted neither open nor closed.
#[derive(Debug, Clone, Copy)]
pub struct ScanStats {
    pub open: u64,
    pub closed: u64,
    pub elapsed: Duration,
}

impl ScanStats {
    /// Ports classified so far (open + closed).
    pub const fn total_scanned(&self) -> u64 {
        self.open + self.closed
    }
}

/// Thread-safe accumulator for worker tallies.
///
/// The mutex-protected pair is the only mutable state shared between
/// workers; everything else in a scan is per-worker or read-only.
#[derive(Debug)]
pub struct Aggregator {
    totals: Mutex<WorkerTally>,
    started_at: Instant,
}

impl Aggregator {
    /// Create an aggregator, stamping the scan start time.
    pub fn new() -> Self {
        Self {
            totals: Mutex::new(WorkerTally::default()),
            started_at: Instant::now(),
        }
    }

    /// Add a worker's tally into the shared totals.
    pub fn merge(&self, tally: WorkerTally) {
        let mut totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        totals.open += tally.open;
        totals.closed += tally.closed;
    }

    /// Read the current totals and elapsed wall-clock time.
    ///
    /// Safe to call mid-scan; the result is always a valid partial sum.
    pub fn snapshot(&self) -> ScanStats {
        let totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        ScanStats {
            open: totals.open,
            closed: totals.closed,
            elapsed: self.started_at.elapsed(),
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_tally_record() {
        let mut tally = WorkerTally::default();
        tally.record(PortState::Open);
        tally.record(PortState::Closed);
        tally.record(PortState::Closed);
        assert_eq!(tally.open, 1);
        assert_eq!(tally.closed, 2);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_merge_accumulates() {
        let aggregator = Aggregator::new();
        aggregator.merge(WorkerTally { open: 1, closed: 4 });
        aggregator.merge(WorkerTally { open: 0, closed: 7 });

        let stats = aggregator.snapshot();
        assert_eq!(stats.open, 1);
        assert_eq!(stats.closed, 11);
        assert_eq!(stats.total_scanned(), 12);
    }

    #[test]
    fn test_merge_order_independence() {
        let tallies = [
            WorkerTally { open: 2, closed: 8 },
            WorkerTally { open: 0, closed: 10 },
            WorkerTally { open: 1, closed: 3 },
            WorkerTally { open: 5, closed: 0 },
        ];

        let forward = Aggregator::new();
        for t in tallies {
            forward.merge(t);
        }
        let reverse = Aggregator::new();
        for t in tallies.iter().rev() {
            reverse.merge(*t);
        }

        let a = forward.snapshot();
        let b = reverse.snapshot();
        assert_eq!((a.open, a.closed), (b.open, b.closed));
        assert_eq!(a.total_scanned(), 29);
    }

    #[test]
    fn test_concurrent_merges() {
        let aggregator = Arc::new(Aggregator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let aggregator = Arc::clone(&aggregator);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        aggregator.merge(WorkerTally { open: 1, closed: 2 });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = aggregator.snapshot();
        assert_eq!(stats.open, 8_000);
        assert_eq!(stats.closed, 16_000);
    }

    #[test]
    fn test_snapshot_mid_scan_is_partial_sum() {
        let aggregator = Aggregator::new();
        aggregator.merge(WorkerTally { open: 1, closed: 1 });

        let partial = aggregator.snapshot();
        assert_eq!(partial.total_scanned(), 2);

        aggregator.merge(WorkerTally { open: 0, closed: 2 });
        assert_eq!(aggregator.snapshot().total_scanned(), 4);
    }
}
