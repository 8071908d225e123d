//! Seam for the external messaging-bot channel.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned by channel sends.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The file to send does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    /// Delivery failed at the transport level (network, auth, rate limit).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Outbound messaging channel used by the dispatch orchestrator.
///
/// Each call is a single delivery attempt with no partial-success semantics;
/// retry is the caller's decision.
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Send an image file to the target room.
    async fn send_image(&self, target: &str, path: &Path) -> Result<(), ChannelError>;
    /// Send an audio file to the target room.
    async fn send_audio(&self, target: &str, path: &Path) -> Result<(), ChannelError>;
    /// Send a text message to the target room.
    async fn send_text(&self, target: &str, text: &str) -> Result<(), ChannelError>;
}
