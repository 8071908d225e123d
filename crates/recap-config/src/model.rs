//! Configuration schema for the recap pipeline.

use serde::{Deserialize, Serialize};

/// Root config for the recap pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecapConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl RecapConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> RecapConfigBuilder {
        RecapConfigBuilder::new()
    }
}

/// Builder for assembling a `RecapConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct RecapConfigBuilder {
    config: RecapConfig,
}

impl RecapConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: RecapConfig::default(),
        }
    }

    /// Replace the storage configuration.
    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.config.storage = storage;
        self
    }

    /// Replace the dispatch configuration.
    pub fn dispatch(mut self, dispatch: DispatchConfig) -> Self {
        self.config.dispatch = dispatch;
        self
    }

    /// Finalize and return the built `RecapConfig`.
    pub fn build(self) -> RecapConfig {
        self.config
    }
}

/// Location of the captured chat logs and their derived artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Base directory holding per-date chat-log directories. Relative paths
    /// resolve against the cwd; absent falls back to `~/.recap/logs`.
    #[serde(default)]
    pub root: Option<String>,
}

/// Settings for the dispatch orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Footer appended to the composed text message; a fixed default is used
    /// when absent.
    #[serde(default)]
    pub footer_text: Option<String>,
    /// Minimum pause between sequential sends to one channel, in
    /// milliseconds.
    #[serde(default = "default_min_send_gap_ms")]
    pub min_send_gap_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            footer_text: None,
            min_send_gap_ms: default_min_send_gap_ms(),
        }
    }
}

/// Default inter-send throttle in milliseconds.
fn default_min_send_gap_ms() -> u64 {
    2000
}
