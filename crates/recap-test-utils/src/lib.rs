//! Test helpers shared across recap crates.

pub mod channel;
pub mod events;
pub mod summarizer;

pub use channel::{RecordingChannel, SendOp};
pub use events::CollectingSink;
pub use summarizer::{FailingSummarizer, ScriptedSummarizer};
