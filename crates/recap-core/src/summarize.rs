//! Observable summarization runs with typed progress streams.

use crate::artifacts::log_path;
use crate::error::RecapCoreError;
use crate::listing;
use async_trait::async_trait;
use futures_util::StreamExt;
use log::{debug, info, warn};
use recap_protocol::{ChatLogRef, EventMsg, EventPayload, EventSink, ProgressEvent};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

const PROGRESS_BUFFER: usize = 64;

/// Summarization engine seam.
///
/// A run reads the chat-log file, pushes human-readable status strings into
/// `progress`, and leaves the four artifact files next to the log as its side
/// effect; this crate does not verify that postcondition.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Run one summarization over the given chat-log file.
    async fn run(
        &self,
        log_path: &Path,
        progress: mpsc::Sender<String>,
    ) -> Result<(), RecapCoreError>;
}

/// Single-subscriber handle for one summarization run.
///
/// Forward-only and not restartable; the stream yields zero or more
/// `Update` events and terminates with exactly one `End`.
#[derive(Debug)]
pub struct ProgressStream {
    /// Chat log the run was started for.
    pub log: ChatLogRef,
    /// Stream of progress events emitted during the run.
    pub events: ReceiverStream<ProgressEvent>,
    handle: JoinHandle<Result<(), RecapCoreError>>,
}

impl ProgressStream {
    /// Receive the next progress event, or `None` once the stream is drained.
    pub async fn next(&mut self) -> Option<ProgressEvent> {
        self.events.next().await
    }

    /// Await completion of the run and return the engine result.
    pub async fn finish(self) -> Result<(), RecapCoreError> {
        self.handle
            .await
            .map_err(|err| RecapCoreError::Summarizer(err.to_string()))?
    }
}

/// Wraps summarization runs into observable, event-emitting tasks.
pub struct ProgressEmitter {
    root: PathBuf,
    summarizer: Arc<dyn Summarizer>,
    event_sink: Option<Arc<dyn EventSink>>,
}

impl ProgressEmitter {
    /// Create an emitter over the storage root and engine seam.
    pub fn new(
        root: impl Into<PathBuf>,
        summarizer: Arc<dyn Summarizer>,
        event_sink: Option<Arc<dyn EventSink>>,
    ) -> Self {
        Self {
            root: root.into(),
            summarizer,
            event_sink,
        }
    }

    /// Start a summarization run for the given chat log.
    ///
    /// Fails with `NotFound` when the log file does not exist; once started,
    /// the run proceeds to its terminal event without cancellation. After the
    /// terminal event the emitter pushes a refreshed date listing to the
    /// event sink so the frontend reflects the new artifacts.
    pub fn start(&self, log: &ChatLogRef) -> Result<ProgressStream, RecapCoreError> {
        let path = log_path(&self.root, log);
        if !path.exists() {
            return Err(RecapCoreError::NotFound(path));
        }
        info!("starting summarization (log={})", log);

        let (event_tx, event_rx) = mpsc::channel(PROGRESS_BUFFER);
        let (update_tx, mut update_rx) = mpsc::channel::<String>(PROGRESS_BUFFER);
        let summarizer = self.summarizer.clone();
        let sink = self.event_sink.clone();
        let root = self.root.clone();
        let log_ref = log.clone();

        let handle = tokio::spawn(async move {
            let forward = async {
                while let Some(message) = update_rx.recv().await {
                    debug!("summarize update (log={}, message={})", log_ref, message);
                    if let Some(sink) = &sink {
                        sink.emit(EventMsg::new(EventPayload::SummarizeUpdate {
                            log: log_ref.clone(),
                            message: message.clone(),
                        }));
                    }
                    let _ = event_tx.send(ProgressEvent::Update { message }).await;
                }
            };
            // The engine owns the only update sender; the forward loop drains
            // until the run returns and drops it.
            let (result, ()) = tokio::join!(summarizer.run(&path, update_tx), forward);

            if let Err(err) = &result {
                warn!("summarization failed (log={}, error={})", log_ref, err);
            } else {
                info!("summarization completed (log={})", log_ref);
            }
            let _ = event_tx.send(ProgressEvent::End).await;

            if let Some(sink) = &sink {
                sink.emit(EventMsg::new(EventPayload::SummarizeEnded {
                    log: log_ref.clone(),
                }));
                match listing::list_log_dates(&root) {
                    Ok(dates) => sink.emit(EventMsg::new(EventPayload::LogListing { dates })),
                    Err(err) => warn!("listing refresh failed (error={})", err),
                }
            }
            result
        });

        Ok(ProgressStream {
            log: log.clone(),
            events: ReceiverStream::new(event_rx),
            handle,
        })
    }
}
