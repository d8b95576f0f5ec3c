use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::LogEntry;

/// Bounded in-memory store of recent log entries. The oldest entry is dropped
/// once `max_size` is reached.
pub struct LogBuffer {
    /// The circular buffer of log entries.
    entries: Mutex<VecDeque<LogEntry>>,
    /// The maximum number of entries to keep.
    max_size: usize,
}

impl LogBuffer {
    /// Creates a new `LogBuffer`.
    ///
    /// # Arguments
    ///
    /// * `max_size` - The maximum number of entries to keep. Zero is raised to one.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_size.min(1024))),
            max_size: max_size.max(1),
        }
    }

    /// Adds a new log entry, evicting the oldest one when full.
    pub fn add_entry(&self, entry: LogEntry) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.max_size {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The last `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
