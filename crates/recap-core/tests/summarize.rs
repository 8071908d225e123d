//! Progress emitter integration tests with scripted engines.

use pretty_assertions::assert_eq;
use recap_core::{ProgressEmitter, RecapCoreError};
use recap_protocol::{ChatLogRef, EventPayload, ProgressEvent};
use recap_test_utils::{CollectingSink, FailingSummarizer, ScriptedSummarizer};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const DATE: &str = "2024-06-01";

fn write_log(root: &Path) -> ChatLogRef {
    let dir = root.join(DATE);
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("room.txt"), "alice: hi\n").expect("log");
    ChatLogRef::new(DATE, "room.txt")
}

#[tokio::test]
async fn missing_log_fails_before_starting() {
    let temp = tempdir().expect("tempdir");
    fs::create_dir_all(temp.path().join(DATE)).expect("mkdir");
    let emitter = ProgressEmitter::new(
        temp.path(),
        Arc::new(ScriptedSummarizer::new(["unused"])),
        None,
    );

    let err = emitter
        .start(&ChatLogRef::new(DATE, "absent.txt"))
        .expect_err("must fail");
    assert!(matches!(err, RecapCoreError::NotFound(_)));
}

#[tokio::test]
async fn stream_forwards_updates_and_ends_exactly_once() {
    let temp = tempdir().expect("tempdir");
    let log = write_log(temp.path());
    let sink = CollectingSink::new();
    let emitter = ProgressEmitter::new(
        temp.path(),
        Arc::new(ScriptedSummarizer::new(["reading chat log", "writing summary"])),
        Some(Arc::new(sink.clone())),
    );

    let mut stream = emitter.start(&log).expect("start");
    let mut events = Vec::new();
    while let Some(event) = stream.next().await {
        events.push(event);
    }
    stream.finish().await.expect("finish");

    assert_eq!(
        events,
        vec![
            ProgressEvent::Update {
                message: "reading chat log".to_string()
            },
            ProgressEvent::Update {
                message: "writing summary".to_string()
            },
            ProgressEvent::End,
        ]
    );
    assert_eq!(
        sink.payloads(),
        vec![
            EventPayload::SummarizeUpdate {
                log: log.clone(),
                message: "reading chat log".to_string(),
            },
            EventPayload::SummarizeUpdate {
                log: log.clone(),
                message: "writing summary".to_string(),
            },
            EventPayload::SummarizeEnded { log },
            EventPayload::LogListing {
                dates: vec![DATE.to_string()],
            },
        ]
    );
}

#[tokio::test]
async fn engine_failure_still_terminates_with_end() {
    let temp = tempdir().expect("tempdir");
    let log = write_log(temp.path());
    let sink = CollectingSink::new();
    let emitter = ProgressEmitter::new(
        temp.path(),
        Arc::new(FailingSummarizer),
        Some(Arc::new(sink.clone())),
    );

    let mut stream = emitter.start(&log).expect("start");
    let mut events = Vec::new();
    while let Some(event) = stream.next().await {
        events.push(event);
    }
    let err = stream.finish().await.expect_err("engine error");

    assert_eq!(
        events,
        vec![
            ProgressEvent::Update {
                message: "reading chat log".to_string()
            },
            ProgressEvent::End,
        ]
    );
    assert!(matches!(err, RecapCoreError::Summarizer(_)));
    assert!(matches!(
        sink.payloads().last(),
        Some(EventPayload::LogListing { .. })
    ));
}

#[tokio::test]
async fn runs_are_independent_per_start() {
    let temp = tempdir().expect("tempdir");
    let log = write_log(temp.path());
    let emitter = ProgressEmitter::new(
        temp.path(),
        Arc::new(ScriptedSummarizer::new(["step"])),
        None,
    );

    for _ in 0..2 {
        let mut stream = emitter.start(&log).expect("start");
        let mut count = 0;
        while let Some(event) = stream.next().await {
            if matches!(event, ProgressEvent::End) {
                count += 1;
            }
        }
        stream.finish().await.expect("finish");
        assert_eq!(count, 1);
    }
}
