//! Error types for trawl.
//!
//! Uses `thiserror` for ergonomic error definitions. All of these are
//! fatal input errors: they are reported before any scanning task starts
//! and the process exits with status 1. Per-port connection failures are
//! never errors; the workers fold them into the closed count.

use thiserror::Error;

/// Errors raised while validating command-line input.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid IP Address: {0}")]
    InvalidAddress(String),

    #[error("Start port (-s) {start} should be lower than end port (-e) {end}")]
    PortOrder { start: u16, end: u16 },
}

/// Result type alias for input validation.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_reported_format() {
        assert_eq!(
            CliError::InvalidAddress("not-an-ip".into()).to_string(),
            "Invalid IP Address: not-an-ip"
        );
        assert_eq!(
            CliError::PortOrder { start: 10, end: 5 }.to_string(),
            "Start port (-s) 10 should be lower than end port (-e) 5"
        );
    }

    #[test]
    fn test_converts_into_anyhow_at_binary_boundary() {
        // main's run() propagates CliError via `?` into anyhow::Error;
        // the rendered message must survive the conversion.
        let err: anyhow::Error = CliError::InvalidAddress("not-an-ip".into()).into();
        assert_eq!(format!("{err:#}"), "Invalid IP Address: not-an-ip");
    }
}
