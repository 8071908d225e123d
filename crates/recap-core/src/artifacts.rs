//! Artifact path derivation for summarized chat logs.
//!
//! Purely deterministic string/path composition: the summarization engine's
//! writer side and the dispatcher's reader side agree on artifact locations
//! without coordination.

use recap_protocol::ChatLogRef;
use std::path::{Path, PathBuf};

/// Trailing suffix of raw chat-log files.
pub const LOG_SUFFIX: &str = ".txt";
/// Stem suffix shared by all derived artifacts.
pub const SUMMARY_SUFFIX: &str = "-summary";
/// Stem suffix of the ranking artifact.
pub const RANK_SUFFIX: &str = "-summary-rank";

/// Derived locations of the four artifacts for one chat log.
///
/// Existence is not checked here; the dispatcher probes lazily at send time
/// because audio/image generation may have failed upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    /// Room name the artifacts are sent to (log name minus its suffix).
    pub target: String,
    /// Textual summary report.
    pub report: PathBuf,
    /// Active-speaker ranking text.
    pub ranking: PathBuf,
    /// Rendered summary image.
    pub image: PathBuf,
    /// Synthesized summary audio.
    pub audio: PathBuf,
}

impl ArtifactSet {
    /// Derive the artifact paths for a chat log under the storage root.
    pub fn locate(root: &Path, log: &ChatLogRef) -> Self {
        let base = log
            .chat_name
            .strip_suffix(LOG_SUFFIX)
            .unwrap_or(&log.chat_name);
        let dir = root.join(&log.date_dir);
        Self {
            target: base.to_string(),
            report: dir.join(format!("{base}{SUMMARY_SUFFIX}.txt")),
            ranking: dir.join(format!("{base}{RANK_SUFFIX}.txt")),
            image: dir.join(format!("{base}{SUMMARY_SUFFIX}.png")),
            audio: dir.join(format!("{base}{SUMMARY_SUFFIX}.mp3")),
        }
    }
}

/// Path of the raw chat-log file for a reference.
pub fn log_path(root: &Path, log: &ChatLogRef) -> PathBuf {
    root.join(&log.date_dir).join(&log.chat_name)
}
