//! Port range type with ordering validation.
//!
//! A `PortRange` is a closed interval over the full `[0, 65535]` port space.
//! Construction enforces `start <= end`, so downstream code never has to
//! re-check the ordering invariant.

use std::fmt;

/// Error type for port range construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidOrder(u16, u16),
}

/// A closed, ordered range of ports (inclusive on both ends).
///
/// Port 0 is deliberately allowed: a connect attempt to it simply fails
/// and is counted as closed, matching every other unreachable port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Create a new port range, rejecting inverted bounds.
    pub const fn new(start: u16, end: u16) -> Result<Self, PortError> {
        if start > end {
            Err(PortError::InvalidOrder(start, end))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Create a range containing a single port.
    pub const fn single(port: u16) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// First port in the range.
    #[inline]
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Last port in the range.
    #[inline]
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Number of ports in the range.
    ///
    /// Computed in usize space so the full range (0-65535) does not overflow.
    pub const fn len(&self) -> usize {
        self.end as usize - self.start as usize + 1
    }

    /// Never true: a valid range always holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Check whether a port falls inside the range.
    pub const fn contains(&self, port: u16) -> bool {
        port >= self.start && port <= self.end
    }

    /// Iterate over all ports in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
