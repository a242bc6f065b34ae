//! One-shot delayed events with cancellation.
//!
//! A timer is a thread parked on a cancel channel. If the wait times out the
//! event is sent to the event loop; if the [`PendingTimer`] is cancelled or
//! dropped first, the thread exits without sending.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Handle to a scheduled event. Dropping it cancels the event.
#[derive(Debug)]
pub struct PendingTimer {
    cancel: Sender<()>,
}

impl PendingTimer {
    /// Cancel the event. A no-op if it already fired.
    pub fn cancel(self) {
        let _ = self.cancel.send(());
    }
}

/// Deliver `event` on `tx` after `delay`, unless cancelled first.
pub fn schedule<E: Send + 'static>(delay: Duration, event: E, tx: Sender<E>) -> PendingTimer {
    let (cancel, cancelled) = mpsc::channel::<()>();

    thread::spawn(move || {
        match cancelled.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {
                // receiver gone means the event loop is shutting down
                let _ = tx.send(event);
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
        }
    });

    PendingTimer { cancel }
}

// ============================================================================
// TESTS
// ============================================================================
