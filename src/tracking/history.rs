//! Confirmed-note history
//!
//! Bounded time-ordered log of reported note events for external timeline
//! rendering. Entries age out past the retention window; the log never grows
//! without bound.

use crate::analysis::result::HistoryEntry;

/// Rolling log of confirmed note events
#[derive(Debug, Default)]
pub struct HistoryRecorder {
    entries: Vec<HistoryEntry>,
}

impl HistoryRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one confirmed note event
    ///
    /// Ticks execute in time order, so appending keeps the log ordered.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Drop entries older than the retention window relative to `now`
    pub fn prune(&mut self, now: f64, retention: f32) {
        let cutoff = now - retention as f64;
        self.entries.retain(|entry| entry.timestamp_seconds >= cutoff);
    }

    /// All retained entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
