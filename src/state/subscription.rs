use std::sync::{Mutex, Weak};

use tokio::sync::mpsc;
use tracing::trace;

use crate::types::CommandDelta;

use super::log::{lock, LogInner};

/// A registered observer of a [`CommandLog`](super::CommandLog).
///
/// Yields one [`CommandDelta`] per append made after registration. Dropping the
/// subscription deregisters it and discards any deltas not yet consumed.
pub struct Subscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<CommandDelta>,
    log: Weak<Mutex<LogInner>>,
    active: bool,
}

impl Subscription {
    pub(super) fn new(
        id: u64,
        rx: mpsc::UnboundedReceiver<CommandDelta>,
        log: Weak<Mutex<LogInner>>,
    ) -> Self {
        Self {
            id,
            rx,
            log,
            active: true,
        }
    }

    /// Returns the next pending delta without waiting.
    pub fn try_next(&mut self) -> Option<CommandDelta> {
        if !self.active {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Waits for the next delta. Returns `None` once the log is gone or the
    /// subscription has been cancelled.
    pub async fn next(&mut self) -> Option<CommandDelta> {
        if !self.active {
            return None;
        }
        self.rx.recv().await
    }

    /// Deregisters from the log and discards every delta not yet consumed.
    ///
    /// Later calls, and the implicit one on drop, do nothing.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.rx.close();
        while self.rx.try_recv().is_ok() {}

        if let Some(inner) = self.log.upgrade() {
            let id = self.id;
            lock(&inner).observers.retain(|observer| observer.id != id);
        }
        trace!(id = self.id, "observer deregistered");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
