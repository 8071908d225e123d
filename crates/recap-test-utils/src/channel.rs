//! Channel mock that records sends and their timestamps.

use async_trait::async_trait;
use parking_lot::Mutex;
use recap_core::{ChannelError, ChatChannel};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// One recorded outbound send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOp {
    Image { target: String, path: PathBuf },
    Audio { target: String, path: PathBuf },
    Text { target: String, text: String },
}

/// `ChatChannel` mock with scriptable per-step failures.
///
/// Timestamps come from `tokio::time::Instant`, so tests running under the
/// paused clock can assert on throttle gaps.
#[derive(Clone, Default)]
pub struct RecordingChannel {
    sends: Arc<Mutex<Vec<(Instant, SendOp)>>>,
    fail_image: bool,
    fail_audio: bool,
    fail_text: bool,
    send_delay: Option<Duration>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every image send with a transport error.
    pub fn failing_image(mut self) -> Self {
        self.fail_image = true;
        self
    }

    /// Fail every audio send with a transport error.
    pub fn failing_audio(mut self) -> Self {
        self.fail_audio = true;
        self
    }

    /// Fail every text send with a transport error.
    pub fn failing_text(mut self) -> Self {
        self.fail_text = true;
        self
    }

    /// Sleep for `delay` before completing each send.
    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = Some(delay);
        self
    }

    /// Recorded sends in order.
    pub fn sends(&self) -> Vec<SendOp> {
        self.sends.lock().iter().map(|(_, op)| op.clone()).collect()
    }

    /// Timestamps of the recorded sends in order.
    pub fn timestamps(&self) -> Vec<Instant> {
        self.sends.lock().iter().map(|(at, _)| *at).collect()
    }

    async fn record(&self, failed: bool, op: SendOp) -> Result<(), ChannelError> {
        if let Some(delay) = self.send_delay {
            tokio::time::sleep(delay).await;
        }
        if failed {
            return Err(ChannelError::Transport("scripted failure".to_string()));
        }
        self.sends.lock().push((Instant::now(), op));
        Ok(())
    }
}

#[async_trait]
impl ChatChannel for RecordingChannel {
    async fn send_image(&self, target: &str, path: &Path) -> Result<(), ChannelError> {
        self.record(
            self.fail_image,
            SendOp::Image {
                target: target.to_string(),
                path: path.to_path_buf(),
            },
        )
        .await
    }

    async fn send_audio(&self, target: &str, path: &Path) -> Result<(), ChannelError> {
        self.record(
            self.fail_audio,
            SendOp::Audio {
                target: target.to_string(),
                path: path.to_path_buf(),
            },
        )
        .await
    }

    async fn send_text(&self, target: &str, text: &str) -> Result<(), ChannelError> {
        self.record(
            self.fail_text,
            SendOp::Text {
                target: target.to_string(),
                text: text.to_string(),
            },
        )
        .await
    }
}
