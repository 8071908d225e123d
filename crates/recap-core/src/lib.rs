//! Core pipeline for turning captured chat logs into summarized artifact
//! sets and dispatching them back into the originating channel.
//!
//! This crate owns the artifact locator, text composition, delivery record
//! store, listing refresh, summarization progress emitter, and the dispatch
//! orchestrator used by embedding shells.

pub mod artifacts;
pub mod channel;
pub mod compose;
pub mod dispatch;
pub mod error;
pub mod listing;
pub mod store;
pub mod summarize;

pub use artifacts::ArtifactSet;
pub use channel::{ChannelError, ChatChannel};
pub use dispatch::{Criticality, Dispatcher};
pub use error::RecapCoreError;
pub use store::{DeliveryStore, StoreError};
pub use summarize::{ProgressEmitter, ProgressStream, Summarizer};

use directories::BaseDirs;
use log::debug;
use recap_config::StorageConfig;
use std::path::PathBuf;

/// Directory under the home directory used when no storage root is set.
const DEFAULT_STORAGE_DIR: &str = ".recap";

/// Resolve the absolute storage root holding per-date chat-log directories.
pub fn resolve_storage_root(config: &StorageConfig) -> Result<PathBuf, RecapCoreError> {
    let cwd = std::env::current_dir().map_err(RecapCoreError::Io)?;
    if let Some(root) = &config.root {
        let root = PathBuf::from(root);
        if root.is_absolute() {
            debug!("using absolute storage root: {}", root.display());
            return Ok(root);
        }
        debug!(
            "resolving storage root relative to cwd: {}",
            cwd.join(&root).display()
        );
        return Ok(cwd.join(root));
    }

    if let Some(home) = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()) {
        return Ok(home.join(DEFAULT_STORAGE_DIR).join("logs"));
    }

    Ok(cwd.join(DEFAULT_STORAGE_DIR).join("logs"))
}

#[cfg(test)]
mod tests {
    use super::resolve_storage_root;
    use pretty_assertions::assert_eq;
    use recap_config::StorageConfig;
    use tempfile::tempdir;

    #[test]
    fn resolve_storage_root_respects_absolute_and_relative_paths() {
        let temp = tempdir().expect("tempdir");
        let absolute = temp.path().join("logs");
        let config = StorageConfig {
            root: Some(absolute.to_string_lossy().to_string()),
        };
        assert_eq!(resolve_storage_root(&config).expect("absolute"), absolute);

        let config = StorageConfig {
            root: Some("tmp/logs".to_string()),
        };
        let cwd = std::env::current_dir().expect("cwd");
        assert_eq!(
            resolve_storage_root(&config).expect("relative"),
            cwd.join("tmp/logs")
        );
    }
}
