//! Typed scan target with address-family detection.
//!
//! The target must be an IPv4 or IPv6 literal. The address family is
//! derived once from the parsed value, never re-scanned from the input
//! string.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Error type for target parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
}

/// Address family of a validated target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrFamily {
    V4,
    V6,
}

impl fmt::Display for AddrFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// A scan target validated as an IPv4 or IPv6 literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTarget {
    ip: IpAddr,
}

impl ScanTarget {
    /// Parse a target from a string, accepting only address literals.
    ///
    /// Hostnames are rejected; resolution is out of scope for the scanner.
    pub fn parse(s: &str) -> Result<Self, TargetError> {
        s.trim()
            .parse::<IpAddr>()
            .map(|ip| Self { ip })
            .map_err(|_| TargetError::InvalidAddress(s.to_string()))
    }

    /// The validated address.
    #[inline]
    pub const fn ip(&self) -> IpAddr {
        self.ip
    }

    /// Address family, computed from the parsed value.
    pub const fn family(&self) -> AddrFamily {
        match self.ip {
            IpAddr::V4(_) => AddrFamily::V4,
            IpAddr::V6(_) => AddrFamily::V6,
        }
    }
}

impl FromStr for ScanTarget {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}
