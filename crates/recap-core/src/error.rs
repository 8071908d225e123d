//! Error types for the core pipeline crate.

use crate::channel::ChannelError;
use crate::store::StoreError;
use recap_protocol::ChatLogRef;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by pipeline operations.
#[derive(Debug, Error)]
pub enum RecapCoreError {
    /// A referenced chat log or artifact file does not exist.
    #[error("not found: {0}")]
    NotFound(PathBuf),
    /// An external channel send failed.
    #[error("transport error: {0}")]
    Transport(String),
    /// Delivery-record write or listing read failed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    /// A dispatch for the same chat log is already running.
    #[error("dispatch already in flight: {0}")]
    DispatchInFlight(ChatLogRef),
    /// Summarization engine failure.
    #[error("summarizer error: {0}")]
    Summarizer(String),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ChannelError> for RecapCoreError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::NotFound(path) => Self::NotFound(path),
            ChannelError::Transport(message) => Self::Transport(message),
        }
    }
}
