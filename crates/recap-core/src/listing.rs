//! Fresh listing of available chat-log date directories.

use crate::artifacts::{LOG_SUFFIX, RANK_SUFFIX, SUMMARY_SUFFIX};
use crate::store::StoreError;
use log::debug;
use std::fs;
use std::path::Path;

/// List the available date directories, newest first.
///
/// Recomputed from storage on every call; there is no cache to go stale.
pub fn list_log_dates(root: &Path) -> Result<Vec<String>, StoreError> {
    let mut dates = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            dates.push(name.to_string());
        }
    }
    dates.sort_by(|a, b| b.cmp(a));
    debug!("listed log dates (root={}, count={})", root.display(), dates.len());
    Ok(dates)
}

/// List the raw chat-log files in one date directory, sorted by name.
///
/// Derived artifacts share the `.txt` extension with the logs they summarize
/// and are filtered out by their stem suffix.
pub fn list_chat_logs(root: &Path, date_dir: &str) -> Result<Vec<String>, StoreError> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(root.join(date_dir))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(stem) = name.strip_suffix(LOG_SUFFIX) else {
            continue;
        };
        if stem.ends_with(SUMMARY_SUFFIX) || stem.ends_with(RANK_SUFFIX) {
            continue;
        }
        logs.push(name.to_string());
    }
    logs.sort();
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::{list_chat_logs, list_log_dates};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn dates_list_newest_first() {
        let temp = tempdir().expect("tempdir");
        for date in ["2024-05-30", "2024-06-01", "2024-05-31"] {
            fs::create_dir(temp.path().join(date)).expect("mkdir");
        }
        fs::write(temp.path().join("stray.txt"), "not a dir").expect("write");
        let dates = list_log_dates(temp.path()).expect("list");
        assert_eq!(dates, vec!["2024-06-01", "2024-05-31", "2024-05-30"]);
    }

    #[test]
    fn chat_logs_exclude_derived_artifacts() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path().join("2024-06-01");
        fs::create_dir(&dir).expect("mkdir");
        for name in [
            "beta.txt",
            "alpha.txt",
            "alpha-summary.txt",
            "alpha-summary-rank.txt",
            "alpha-summary.png",
            "alpha.delivery.json",
        ] {
            fs::write(dir.join(name), "x").expect("write");
        }
        let logs = list_chat_logs(temp.path(), "2024-06-01").expect("list");
        assert_eq!(logs, vec!["alpha.txt", "beta.txt"]);
    }

    #[test]
    fn missing_root_surfaces_storage_error() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("absent");
        assert!(list_log_dates(&missing).is_err());
    }
}
