//! Delivery record persistence keyed by date directory and chat name.

use log::{debug, info};
use parking_lot::Mutex;
use recap_protocol::DeliveryRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned by the delivery record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// JSON-file-backed store for per-chat delivery metadata.
///
/// One file per `(date_dir, chat_base)` key; writing twice for the same key
/// replaces the prior record, no history is retained.
pub struct DeliveryStore {
    /// Storage root holding the per-date directories.
    root: PathBuf,
    /// Serialize write access to record files.
    write_lock: Mutex<()>,
}

impl DeliveryStore {
    /// Create a store rooted at the chat-log storage directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        debug!("initialized delivery store (root={})", root.display());
        Self {
            root,
            write_lock: Mutex::new(()),
        }
    }

    /// Build the record file path for a key.
    fn record_path(&self, date_dir: &str, chat_base: &str) -> PathBuf {
        self.root
            .join(date_dir)
            .join(format!("{chat_base}.delivery.json"))
    }

    /// Write the delivery record for a key, replacing any prior record.
    pub fn record(
        &self,
        date_dir: &str,
        chat_base: &str,
        record: &DeliveryRecord,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let path = self.record_path(date_dir, chat_base);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(record)?;
        fs::write(&path, contents)?;
        info!(
            "recorded delivery (date_dir={}, chat={}, sent={})",
            date_dir, chat_base, record.sent
        );
        Ok(())
    }

    /// Load the delivery record for a key, if one was written.
    pub fn load(
        &self,
        date_dir: &str,
        chat_base: &str,
    ) -> Result<Option<DeliveryRecord>, StoreError> {
        let path = self.record_path(date_dir, chat_base);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

#[cfg(test)]
mod tests {
    use super::DeliveryStore;
    use pretty_assertions::assert_eq;
    use recap_protocol::DeliveryRecord;
    use tempfile::tempdir;

    #[test]
    fn record_round_trips() {
        let temp = tempdir().expect("tempdir");
        let store = DeliveryStore::new(temp.path());
        let record = DeliveryRecord {
            sent: true,
            sent_at_ms: 1_717_200_000_000,
        };
        store
            .record("2024-06-01", "room", &record)
            .expect("record");
        let loaded = store.load("2024-06-01", "room").expect("load");
        assert_eq!(loaded, Some(record));
    }

    #[test]
    fn record_overwrites_prior_record() {
        let temp = tempdir().expect("tempdir");
        let store = DeliveryStore::new(temp.path());
        let first = DeliveryRecord {
            sent: true,
            sent_at_ms: 1,
        };
        let second = DeliveryRecord {
            sent: true,
            sent_at_ms: 2,
        };
        store.record("2024-06-01", "room", &first).expect("first");
        store
            .record("2024-06-01", "room", &second)
            .expect("second");
        let loaded = store.load("2024-06-01", "room").expect("load");
        assert_eq!(loaded.expect("record").sent_at_ms, 2);
    }

    #[test]
    fn load_returns_none_for_missing_key() {
        let temp = tempdir().expect("tempdir");
        let store = DeliveryStore::new(temp.path());
        assert_eq!(store.load("2024-06-01", "room").expect("load"), None);
    }
}
