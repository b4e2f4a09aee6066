//! Interrupt-driven scan cancellation.
//!
//! The controller moves through `Idle -> Armed -> Triggered`. Arming
//! spawns a listener for Ctrl-C (and SIGTERM on unix) that cancels the
//! shared token. The listener only flips the token: capturing a stats
//! snapshot and reporting stay with the orchestrator and `main`, never
//! inside the signal handler.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Lifecycle of the cancellation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelState {
    /// Before the scan starts; no listener installed.
    Idle,
    /// Scan in progress; signal listener running.
    Armed,
    /// Interrupt observed; the scan should stop and report partials.
    Triggered,
}

/// Watches for an interrupt request and cancels the scan token.
#[derive(Debug)]
pub struct CancellationController {
    token: CancellationToken,
    armed: AtomicBool,
}

impl CancellationController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            armed: AtomicBool::new(false),
        }
    }

    /// Spawn the signal listener, moving the controller to `Armed`.
    ///
    /// Must be called from within a tokio runtime. Arming twice is a
    /// no-op; only one listener is ever installed.
    pub fn arm(&self) {
        if self.armed.swap(true, Ordering::SeqCst) {
            return;
        }
        let token = self.token.clone();
        tokio::spawn(async move {
            if wait_for_interrupt().await {
                debug!("interrupt received, cancelling scan");
                token.cancel();
            }
        });
    }

    /// Cancel directly, without a signal. Moves straight to `Triggered`.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// A clone of the token workers and the orchestrator observe.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CancelState {
        if self.token.is_cancelled() {
            CancelState::Triggered
        } else if self.armed.load(Ordering::SeqCst) {
            CancelState::Armed
        } else {
            CancelState::Idle
        }
    }
}

impl Default for CancellationController {
    fn default() -> Self {
        Self::new()
    }
}

/// Block until an interrupt request arrives.
///
/// Returns false only if the signal hooks themselves cannot be
/// installed, in which case cancellation is simply unavailable.
async fn wait_for_interrupt() -> bool {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => result.is_ok(),
                    _ = term.recv() => true,
                }
            }
            Err(_) => tokio::signal::ctrl_c().await.is_ok(),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_starts_idle() {
        let controller = CancellationController::new();
        assert_eq!(controller.state(), CancelState::Idle);
        assert!(!controller.token().is_cancelled());
    }

    #[tokio::test]
    async fn test_arming_transitions_to_armed() {
        let controller = CancellationController::new();
        controller.arm();
        assert_eq!(controller.state(), CancelState::Armed);

        // Re-arming stays armed and must not panic.
        controller.arm();
        assert_eq!(controller.state(), CancelState::Armed);
    }

    #[tokio::test]
    async fn test_trigger_cancels_token() {
        let controller = CancellationController::new();
        controller.arm();
        let token = controller.token();

        controller.trigger();
        assert_eq!(controller.state(), CancelState::Triggered);
        assert!(token.is_cancelled());
        // Waiting on an already-cancelled token completes immediately.
        token.cancelled().await;
    }

    #[test]
    fn test_trigger_without_arming() {
        let controller = CancellationController::new();
        controller.trigger();
        assert_eq!(controller.state(), CancelState::Triggered);
    }
}
