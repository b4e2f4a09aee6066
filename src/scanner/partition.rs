//! Range partitioning for worker assignment.
//!
//! Slices a port range into consecutive, equally sized chunks, one per
//! worker. The chunks exactly cover the range: no gaps, no overlaps,
//! every chunk non-empty.

use crate::types::PortRange;

/// A contiguous slice of the scan range assigned to one worker.
///
/// Worker indices are 1-based in chunk order and exist only for
/// display; they carry no scheduling meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkChunk {
    low: u16,
    high: u16,
    worker: usize,
}

impl WorkChunk {
    /// Lowest port in the chunk.
    #[inline]
    pub const fn low(&self) -> u16 {
        self.low
    }

    /// Highest port in the chunk.
    #[inline]
    pub const fn high(&self) -> u16 {
        self.high
    }

    /// 1-based worker index.
    #[inline]
    pub const fn worker(&self) -> usize {
        self.worker
    }

    /// Number of ports in the chunk.
    pub const fn len(&self) -> usize {
        self.high as usize - self.low as usize + 1
    }

    /// Never true: chunks are always non-empty.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the chunk's ports in ascending order.
    pub fn ports(&self) -> impl Iterator<Item = u16> {
        self.low..=self.high
    }
}

/// Split a port range into chunks for the requested number of workers.
///
/// Effective concurrency is `min(requested, range.len())` with a floor of
/// one, so every chunk is non-empty. Chunk size is the ceiling of
/// `range.len() / effective`; the final chunk may be shorter. Chunks are
/// returned in ascending port order.
pub fn partition(range: PortRange, requested_workers: usize) -> Vec<WorkChunk> {
    let size = range.len();
    let effective = requested_workers.clamp(1, size);
    let chunk_size = size.div_ceil(effective);

    let mut chunks = Vec::with_capacity(effective);
    // Walk in u32 space: high + 1 overflows u16 at the top of the range.
    let mut low = u32::from(range.start());
    let end = u32::from(range.end());
    let mut worker = 1;
    while low <= end {
        let high = (low + chunk_size as u32 - 1).min(end);
        chunks.push(WorkChunk {
            low: low as u16,
            high: high as u16,
            worker,
        });
        worker += 1;
        low = high + 1;
    }
    chunks
}
