//! Auto-save configuration.

use serde::{Deserialize, Serialize};

/// When mutations reach the store.
///
/// With `debounce_ms == 0` every mutation is written immediately. A positive
/// debounce batches bursts of strokes: the write happens once changes pause
/// for `debounce_ms`, or at the latest `max_delay_ms` after the first unsaved
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSaveConfig {
    /// Whether mutations are saved without an explicit flush.
    pub enabled: bool,

    /// Quiet period in milliseconds before a batched write.
    pub debounce_ms: u64,

    /// Upper bound in milliseconds on how long a change may stay unsaved.
    pub max_delay_ms: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self::write_through()
    }
}

impl AutoSaveConfig {
    /// Save on every mutation.
    pub fn write_through() -> Self {
        Self {
            enabled: true,
            debounce_ms: 0,
            max_delay_ms: 30_000,
        }
    }

    /// Batch writes behind a debounce window.
    pub fn debounced(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            ..Self::write_through()
        }
    }

    /// Only explicit flushes write.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::write_through()
        }
    }

    pub fn is_write_through(&self) -> bool {
        self.enabled && self.debounce_ms == 0
    }

    /// Check if a batched save is due given the time since the last change
    /// and the time since the first unsaved change.
    pub fn should_save(&self, since_last_change_ms: u64, since_first_unsaved_ms: u64) -> bool {
        if !self.enabled {
            return false;
        }
        since_last_change_ms >= self.debounce_ms || since_first_unsaved_ms >= self.max_delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_writes_through() {
        let config = AutoSaveConfig::default();
        assert!(config.is_write_through());
        assert!(config.should_save(0, 0));
    }

    #[test]
    fn disabled_never_saves() {
        let config = AutoSaveConfig::disabled();
        assert!(!config.is_write_through());
        assert!(!config.should_save(10_000, 60_000));
    }

    #[test]
    fn debounce_waits_for_quiet_period() {
        let config = AutoSaveConfig::debounced(500);
        assert!(!config.should_save(100, 100));
        assert!(config.should_save(600, 600));
    }

    #[test]
    fn max_delay_forces_save_during_bursts() {
        let config = AutoSaveConfig::debounced(500);
        assert!(!config.should_save(100, 29_000));
        assert!(config.should_save(100, 31_000));
    }

    #[test]
    fn partial_input_uses_defaults() {
        let config: AutoSaveConfig = serde_json::from_str(r#"{"debounce_ms": 250}"#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.max_delay_ms, 30_000);
    }
}
