//! Per-chunk connect-scan worker.
//!
//! Walks its chunk in ascending port order, attempting one bounded TCP
//! connect per port. A successful handshake marks the port open and the
//! stream is dropped immediately; every failure, whatever the cause,
//! marks the port closed. No retries, no third state.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::scanner::aggregate::WorkerTally;
use crate::scanner::partition::WorkChunk;
use crate::scanner::{PortEvent, PortState};

/// Scans one chunk of the port range with bounded connect attempts.
///
/// Workers share no mutable state while scanning; the tally is local
/// and handed to the aggregator once, after the whole chunk is done.
pub struct ScanWorker {
    target: IpAddr,
    attempt_timeout: Duration,
}

impl ScanWorker {
    /// Create a worker for the given target.
    ///
    /// `attempt_timeout` bounds each individual connect attempt; there is
    /// no overall deadline for the chunk.
    pub fn new(target: IpAddr, attempt_timeout: Duration) -> Self {
        Self {
            target,
            attempt_timeout,
        }
    }

    /// Classify a single port with one bounded connect attempt.
    async fn probe(&self, port: u16) -> PortState {
        let addr = SocketAddr::new(self.target, port);
        match timeout(self.attempt_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                // The handshake is the whole test; the connection itself
                // is not used for anything.
                drop(stream);
                PortState::Open
            }
            // Refused, unreachable, timed out: all fold into closed.
            Ok(Err(_)) | Err(_) => PortState::Closed,
        }
    }

    /// Scan the chunk's ports in ascending order and return the tally.
    ///
    /// Checks `cancel` between attempts and stops early once it fires;
    /// ports not yet attempted stay uncounted. Per-port events are fire
    /// and forget: a gone receiver never stalls or fails the scan.
    pub async fn scan_chunk(
        &self,
        chunk: WorkChunk,
        events: &mpsc::UnboundedSender<PortEvent>,
        cancel: &CancellationToken,
    ) -> WorkerTally {
        debug!(
            worker = chunk.worker(),
            low = chunk.low(),
            high = chunk.high(),
            "worker started"
        );

        let mut tally = WorkerTally::default();
        for port in chunk.ports() {
            if cancel.is_cancelled() {
                debug!(worker = chunk.worker(), port, "worker cancelled");
                break;
            }
            let state = self.probe(port).await;
            tally.record(state);
            let _ = events.send(PortEvent {
                port,
                state,
                worker: chunk.worker(),
            });
        }

        debug!(
            worker = chunk.worker(),
            open = tally.open,
            closed = tally.closed,
            "worker finished"
        );
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::partition::partition;
    use crate::types::PortRange;
    use std::net::Ipv4Addr;

    fn loopback_worker(timeout_ms: u64) -> ScanWorker {
        ScanWorker::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            Duration::from_millis(timeout_ms),
        )
    }

    fn single_chunk(start: u16, end: u16) -> WorkChunk {
        let chunks = partition(PortRange::new(start, end).unwrap(), 1);
        chunks[0]
    }

    #[tokio::test]
    async fn test_scan_chunk_finds_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open_port = listener.local_addr().unwrap().port();

        let worker = loopback_worker(500);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let tally = worker
            .scan_chunk(single_chunk(open_port, open_port), &tx, &cancel)
            .await;

        assert_eq!(tally.open, 1);
        assert_eq!(tally.closed, 0);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.port, open_port);
        assert_eq!(event.state, PortState::Open);
        assert_eq!(event.worker, 1);
    }

    #[tokio::test]
    async fn test_scan_chunk_counts_closed_port() {
        // Bind then drop to find a port that is free, hence closed.
        let free_port = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let worker = loopback_worker(500);
        let (tx, _rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let tally = worker
            .scan_chunk(single_chunk(free_port, free_port), &tx, &cancel)
            .await;

        assert_eq!(tally.open, 0);
        assert_eq!(tally.closed, 1);
    }

    #[tokio::test]
    async fn test_scan_chunk_events_arrive_in_port_order() {
        let free_port = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let chunk = single_chunk(free_port, free_port + 3);

        let worker = loopback_worker(500);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let tally = worker.scan_chunk(chunk, &tx, &cancel).await;
        assert_eq!(tally.total(), 4);

        let mut seen = Vec::new();
        while let Ok(event) = rx.try_recv() {
            seen.push(event.port);
        }
        let expected: Vec<u16> = chunk.ports().collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_scan_chunk_stops_when_cancelled() {
        let worker = loopback_worker(500);
        let (tx, _rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let tally = worker
            .scan_chunk(single_chunk(40000, 40050), &tx, &cancel)
            .await;

        // Cancelled before the first attempt: nothing counted either way.
        assert_eq!(tally.total(), 0);
    }

    #[tokio::test]
    async fn test_scan_chunk_survives_dropped_receiver() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open_port = listener.local_addr().unwrap().port();

        let worker = loopback_worker(500);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let cancel = CancellationToken::new();

        let tally = worker
            .scan_chunk(single_chunk(open_port, open_port), &tx, &cancel)
            .await;
        assert_eq!(tally.open, 1);
    }
}
