//! Config file discovery, parsing, and validation.

use crate::{ConfigError, RecapConfig};
use directories::BaseDirs;
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename.
const DEFAULT_CONFIG_FILE: &str = "recap.json5";
/// Default config directory under the home directory.
const DEFAULT_CONFIG_DIR: &str = ".recap";
/// Upper bound accepted for the inter-send throttle (one minute).
const MAX_SEND_GAP_MS: u64 = 60_000;

impl RecapConfig {
    /// Load a config from a path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load a config from JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        let config: RecapConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the first config found at the default locations, or defaults.
    ///
    /// Probes `{cwd}/recap.json5`, then `~/.recap/recap.json5`; a missing
    /// file is not an error, a malformed one is.
    pub fn load_or_default(cwd: impl AsRef<Path>) -> Result<Self, ConfigError> {
        for candidate in default_config_paths(cwd.as_ref()) {
            if candidate.exists() {
                return Self::load_from_path(candidate);
            }
            debug!("skipping missing config: {}", candidate.display());
        }
        info!("no config file found; using defaults");
        Ok(Self::default())
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatch.min_send_gap_ms > MAX_SEND_GAP_MS {
            return Err(ConfigError::Invalid(format!(
                "dispatch.min_send_gap_ms must be at most {MAX_SEND_GAP_MS}"
            )));
        }
        if let Some(root) = &self.storage.root {
            if root.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "storage.root must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Candidate config paths in precedence order.
fn default_config_paths(cwd: &Path) -> Vec<PathBuf> {
    let mut paths = vec![cwd.join(DEFAULT_CONFIG_FILE)];
    if let Some(dirs) = BaseDirs::new() {
        paths.push(
            dirs.home_dir()
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILE),
        );
    }
    paths
}
