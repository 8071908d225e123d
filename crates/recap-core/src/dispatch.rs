//! Dispatch orchestration: send the artifact set into the originating
//! channel and record the delivery.

use crate::artifacts::ArtifactSet;
use crate::channel::ChatChannel;
use crate::compose::compose;
use crate::error::RecapCoreError;
use crate::store::DeliveryStore;
use chrono::Utc;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use recap_config::DispatchConfig;
use recap_protocol::{ChatLogRef, DeliveryRecord, EventMsg, EventPayload, EventSink};
use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Declared tolerance of one dispatch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Failure aborts the whole dispatch.
    Mandatory,
    /// Failure is logged and swallowed; the pipeline proceeds.
    BestEffort,
}

/// Sequences the per-chat send pipeline and finalizes delivery bookkeeping.
///
/// Steps run strictly in order: image, throttle, audio, throttle, composed
/// text, delivery record. The throttle protects the external channel from
/// flood detection, so no step may be reordered or parallelized.
pub struct Dispatcher {
    root: PathBuf,
    channel: Arc<dyn ChatChannel>,
    store: DeliveryStore,
    footer: Option<String>,
    send_gap: Duration,
    event_sink: Option<Arc<dyn EventSink>>,
    in_flight: Mutex<HashSet<ChatLogRef>>,
}

impl Dispatcher {
    /// Build a dispatcher over the storage root and channel seam.
    pub fn new(
        root: impl Into<PathBuf>,
        config: &DispatchConfig,
        channel: Arc<dyn ChatChannel>,
        store: DeliveryStore,
        event_sink: Option<Arc<dyn EventSink>>,
    ) -> Self {
        Self {
            root: root.into(),
            channel,
            store,
            footer: config.footer_text.clone(),
            send_gap: Duration::from_millis(config.min_send_gap_ms),
            event_sink,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Dispatch the artifact set for one chat log.
    ///
    /// Only an image-send failure propagates; audio and text failures are
    /// absorbed and the delivery record is written regardless. "Dispatched"
    /// means the mandatory image notification went out, not that every
    /// artifact was delivered.
    pub async fn dispatch(&self, log: &ChatLogRef) -> Result<(), RecapCoreError> {
        let _guard = self.claim(log)?;
        let artifacts = ArtifactSet::locate(&self.root, log);
        info!("dispatching summary (log={}, target={})", log, artifacts.target);

        if let Err(err) = self
            .run_step(
                "send image",
                Criticality::Mandatory,
                self.send_image(&artifacts),
            )
            .await
        {
            self.emit(EventPayload::DispatchFailed {
                log: log.clone(),
                message: err.to_string(),
            });
            return Err(err);
        }
        sleep(self.send_gap).await;

        let audio_sent = self
            .run_step(
                "send audio",
                Criticality::BestEffort,
                self.send_audio(&artifacts),
            )
            .await?;
        if audio_sent {
            sleep(self.send_gap).await;
        }

        self.run_step(
            "send text",
            Criticality::BestEffort,
            self.send_text(&artifacts),
        )
        .await?;

        let record = DeliveryRecord {
            sent: true,
            sent_at_ms: Utc::now().timestamp_millis(),
        };
        self.store
            .record(&log.date_dir, &artifacts.target, &record)?;

        self.emit(EventPayload::DispatchCompleted { log: log.clone() });
        info!("dispatch recorded (log={})", log);
        Ok(())
    }

    /// Run one step under its declared criticality.
    ///
    /// Returns whether the step succeeded; a mandatory failure propagates,
    /// a best-effort failure is logged and reported as `false`.
    async fn run_step<F>(
        &self,
        name: &str,
        criticality: Criticality,
        step: F,
    ) -> Result<bool, RecapCoreError>
    where
        F: Future<Output = Result<(), RecapCoreError>>,
    {
        match step.await {
            Ok(()) => {
                debug!("step completed (step={})", name);
                Ok(true)
            }
            Err(err) => match criticality {
                Criticality::Mandatory => {
                    error!("mandatory step failed (step={}, error={})", name, err);
                    Err(err)
                }
                Criticality::BestEffort => {
                    warn!("best-effort step failed (step={}, error={})", name, err);
                    Ok(false)
                }
            },
        }
    }

    /// Send the rendered summary image.
    async fn send_image(&self, artifacts: &ArtifactSet) -> Result<(), RecapCoreError> {
        if !artifacts.image.exists() {
            return Err(RecapCoreError::NotFound(artifacts.image.clone()));
        }
        self.channel
            .send_image(&artifacts.target, &artifacts.image)
            .await?;
        Ok(())
    }

    /// Send the synthesized summary audio.
    async fn send_audio(&self, artifacts: &ArtifactSet) -> Result<(), RecapCoreError> {
        if !artifacts.audio.exists() {
            return Err(RecapCoreError::NotFound(artifacts.audio.clone()));
        }
        self.channel
            .send_audio(&artifacts.target, &artifacts.audio)
            .await?;
        Ok(())
    }

    /// Compose and send the text message.
    ///
    /// The report read degrades to a header-less message; the ranking file is
    /// required for the step to proceed meaningfully.
    async fn send_text(&self, artifacts: &ArtifactSet) -> Result<(), RecapCoreError> {
        let report = tokio::fs::read_to_string(&artifacts.report).await.ok();
        let ranking = tokio::fs::read_to_string(&artifacts.ranking)
            .await
            .map_err(|_| RecapCoreError::NotFound(artifacts.ranking.clone()))?;
        let text = compose(report.as_deref(), &ranking, self.footer.as_deref());
        self.channel.send_text(&artifacts.target, &text).await?;
        Ok(())
    }

    /// Claim the in-flight slot for a chat log.
    fn claim(&self, log: &ChatLogRef) -> Result<InFlightGuard<'_>, RecapCoreError> {
        if !self.in_flight.lock().insert(log.clone()) {
            return Err(RecapCoreError::DispatchInFlight(log.clone()));
        }
        Ok(InFlightGuard {
            set: &self.in_flight,
            log: log.clone(),
        })
    }

    /// Emit a frontend notice if an event sink is configured.
    fn emit(&self, payload: EventPayload) {
        let Some(sink) = &self.event_sink else {
            return;
        };
        sink.emit(EventMsg::new(payload));
    }
}

/// Releases the in-flight slot when a dispatch run ends.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<ChatLogRef>>,
    log: ChatLogRef,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.log);
    }
}
