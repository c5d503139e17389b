//! Unsaved-change tracking for auto-save.

use std::time::Instant;

use super::AutoSaveConfig;

/// Tracks mutations that have not reached the store yet.
///
/// A failed write keeps the tracker dirty, so the next flush retries with the
/// then-current state.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    /// Mutations since the last successful write.
    pending: u64,

    /// When the most recent mutation happened.
    last_change: Option<Instant>,

    /// When the oldest unsaved mutation happened.
    first_unsaved_change: Option<Instant>,

    /// Consecutive failed writes.
    failures: u32,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.pending > 0
    }

    #[inline]
    pub fn pending_changes(&self) -> u64 {
        self.pending
    }

    #[inline]
    pub fn consecutive_failures(&self) -> u32 {
        self.failures
    }

    /// Record one mutation.
    pub fn mark_dirty(&mut self) {
        let now = Instant::now();
        self.pending += 1;
        self.last_change = Some(now);
        self.first_unsaved_change.get_or_insert(now);
    }

    /// A write of the current state succeeded.
    pub fn save_complete(&mut self) {
        self.pending = 0;
        self.failures = 0;
        self.last_change = None;
        self.first_unsaved_change = None;
    }

    /// A write failed; changes stay pending.
    pub fn save_failed(&mut self) {
        self.failures = self.failures.saturating_add(1);
    }

    pub fn ms_since_last_change(&self) -> Option<u64> {
        self.last_change.map(elapsed_ms)
    }

    pub fn ms_since_first_unsaved(&self) -> Option<u64> {
        self.first_unsaved_change.map(elapsed_ms)
    }

    /// Check if a batched save is due under `config`.
    pub fn should_auto_save(&self, config: &AutoSaveConfig) -> bool {
        if !self.is_dirty() {
            return false;
        }
        match (self.ms_since_last_change(), self.ms_since_first_unsaved()) {
            (Some(since_last), Some(since_first)) => config.should_save(since_last, since_first),
            _ => false,
        }
    }
}

fn elapsed_ms(instant: Instant) -> u64 {
    u64::try_from(instant.elapsed().as_millis()).unwrap_or(u64::MAX)
}
