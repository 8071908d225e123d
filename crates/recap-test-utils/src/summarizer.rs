//! Summarizer mocks for progress-emitter tests.

use async_trait::async_trait;
use recap_core::{RecapCoreError, Summarizer};
use std::path::Path;
use tokio::sync::mpsc;

/// Engine mock that emits a fixed sequence of status updates.
pub struct ScriptedSummarizer {
    updates: Vec<String>,
}

impl ScriptedSummarizer {
    pub fn new(updates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            updates: updates.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Summarizer for ScriptedSummarizer {
    async fn run(
        &self,
        _log_path: &Path,
        progress: mpsc::Sender<String>,
    ) -> Result<(), RecapCoreError> {
        for update in &self.updates {
            let _ = progress.send(update.clone()).await;
        }
        Ok(())
    }
}

/// Engine mock that emits one update and then fails.
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn run(
        &self,
        _log_path: &Path,
        progress: mpsc::Sender<String>,
    ) -> Result<(), RecapCoreError> {
        let _ = progress.send("reading chat log".to_string()).await;
        Err(RecapCoreError::Summarizer("engine exploded".to_string()))
    }
}
