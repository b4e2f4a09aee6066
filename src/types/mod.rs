//! Core type definitions using newtype patterns for type safety.
//!
//! These types make invalid inputs unrepresentable past the validation
//! boundary: a constructed `PortRange` is always ordered, a `ScanTarget`
//! is always a parsed address.

mod port;
mod target;

pub use port::{PortError, PortRange};
pub use target::{AddrFamily, ScanTarget, TargetError};
