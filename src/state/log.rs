use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::trace;

use crate::types::{Command, CommandDelta};

use super::Subscription;

pub(super) struct Observer {
    pub(super) id: u64,
    pub(super) tx: mpsc::UnboundedSender<CommandDelta>,
}

#[derive(Default)]
pub(super) struct LogInner {
    pub(super) commands: Vec<Command>,
    pub(super) observers: Vec<Observer>,
    next_observer_id: u64,
}

pub(super) fn lock(inner: &Mutex<LogInner>) -> MutexGuard<'_, LogInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ordered history of terminal interaction for one session.
///
/// Records are only ever appended. Cloning the handle shares the same log.
#[derive(Clone, Default)]
pub struct CommandLog {
    inner: Arc<Mutex<LogInner>>,
}

impl CommandLog {
    /// An empty log with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an input record and returns its index.
    pub fn append_input(&self, text: impl Into<String>) -> usize {
        self.append(Command::input(text))
    }

    /// Appends an output record and returns its index.
    pub fn append_output(&self, text: impl Into<String>) -> usize {
        self.append(Command::output(text))
    }

    fn append(&self, command: Command) -> usize {
        let mut inner = lock(&self.inner);
        let index = inner.commands.len();
        inner.commands.push(command.clone());

        // Observers whose receiving side is gone are pruned here.
        inner.observers.retain(|observer| {
            observer
                .tx
                .send(CommandDelta {
                    index,
                    command: command.clone(),
                })
                .is_ok()
        });

        trace!(index, kind = ?command.kind, observers = inner.observers.len(), "command appended");
        index
    }

    /// Snapshot of every record in insertion order.
    pub fn commands(&self) -> Vec<Command> {
        lock(&self.inner).commands.clone()
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        lock(&self.inner).commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers an observer and returns the log as it stood at registration.
    ///
    /// The snapshot and the registration are taken under the same lock, so every
    /// record is either in the snapshot or delivered through the subscription,
    /// never both and never neither.
    pub fn subscribe(&self) -> (Vec<Command>, Subscription) {
        let mut inner = lock(&self.inner);
        let (tx, rx) = mpsc::unbounded_channel();
        let id = inner.next_observer_id;
        inner.next_observer_id += 1;
        inner.observers.push(Observer { id, tx });

        let snapshot = inner.commands.clone();
        trace!(id, snapshot_len = snapshot.len(), "observer registered");

        (snapshot, Subscription::new(id, rx, Arc::downgrade(&self.inner)))
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).observers.len()
    }
}
