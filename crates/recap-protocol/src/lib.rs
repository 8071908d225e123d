//! Shared event and record types for the recap pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one day's captured conversation in one room.
///
/// Derived from the filesystem listing and never mutated: `date_dir` is the
/// calendar-day bucket, `chat_name` the raw log file name within it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChatLogRef {
    /// Calendar-day directory, e.g. `2024-06-01`.
    pub date_dir: String,
    /// Chat log file name, e.g. `my-room.txt`.
    pub chat_name: String,
}

impl ChatLogRef {
    /// Create a reference from its two components.
    pub fn new(date_dir: impl Into<String>, chat_name: impl Into<String>) -> Self {
        Self {
            date_dir: date_dir.into(),
            chat_name: chat_name.into(),
        }
    }
}

impl fmt::Display for ChatLogRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.date_dir, self.chat_name)
    }
}

/// Per-chat delivery bookkeeping, written once per dispatch attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryRecord {
    /// Whether the mandatory image notification went out.
    pub sent: bool,
    /// Epoch milliseconds of the dispatch attempt.
    pub sent_at_ms: i64,
}

/// Progress message emitted by a running summarization.
///
/// Consumed exactly once by the stream returned for that run; the stream
/// terminates with exactly one `End`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type", content = "payload")]
pub enum ProgressEvent {
    /// Human-readable status update from the summarization engine.
    Update { message: String },
    /// Terminal marker; no further events follow.
    End,
}

/// Wrapper for events emitted toward the embedding frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMsg {
    /// Unique id for the event.
    pub id: Uuid,
    /// Timestamp when the event was created.
    pub created_at: DateTime<Utc>,
    /// Event payload content.
    pub payload: EventPayload,
}

impl EventMsg {
    /// Wrap a payload with a fresh id and timestamp.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            payload,
        }
    }
}

/// One-way, fire-and-forget notices for the frontend shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type", content = "payload")]
pub enum EventPayload {
    /// Transient toast-style notice.
    Toast { message: String },
    /// Progress update forwarded from a summarization run.
    SummarizeUpdate { log: ChatLogRef, message: String },
    /// A summarization run reached its terminal event.
    SummarizeEnded { log: ChatLogRef },
    /// Refreshed set of available chat-log date directories.
    LogListing { dates: Vec<String> },
    /// A dispatch run completed and recorded its delivery.
    DispatchCompleted { log: ChatLogRef },
    /// A dispatch run aborted at the mandatory step.
    DispatchFailed { log: ChatLogRef, message: String },
}

/// Sink interface for pipeline events.
///
/// Implementations fan events out to whatever shell embeds the pipeline; no
/// acknowledgment is expected.
pub trait EventSink: Send + Sync {
    /// Emit an event to downstream listeners.
    fn emit(&self, event: EventMsg);
}
