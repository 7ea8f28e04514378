//! The [`IssueSource`] seam and the snapshot-file source.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use sprintload_core::Item;
use sprintload_core::snapshot::read_snapshot;
use tracing::debug;

use crate::error::{Result, TrackerError};

/// Anything that can list the items of a sprint.
pub trait IssueSource {
    /// All items in `sprint`, changelogs included, in source order.
    fn sprint_items(&self, sprint: &str) -> Result<Vec<Item>>;
}

impl<S: IssueSource + ?Sized> IssueSource for Box<S> {
    fn sprint_items(&self, sprint: &str) -> Result<Vec<Item>> {
        (**self).sprint_items(sprint)
    }
}

/// A snapshot file (JSON array or JSON Lines) treated as the whole sprint.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IssueSource for SnapshotSource {
    fn sprint_items(&self, sprint: &str) -> Result<Vec<Item>> {
        let file = File::open(&self.path).map_err(|e| TrackerError::io(&self.path, e))?;
        let items =
            read_snapshot(BufReader::new(file)).map_err(|source| TrackerError::Snapshot {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            path = %self.path.display(),
            sprint,
            items = items.len(),
            "loaded snapshot"
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sprintload_core::CoreError;

    #[test]
    fn reads_jsonl_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprint.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"key":"SL-1","assignee":"Alice","status":"Done","type":"Story","changelog":[]}"#,
                "\n\n",
                r#"{"key":"SL-2","assignee":"Bob","status":"In Progress","type":"Bug","changelog":[]}"#,
                "\n",
            ),
        )
        .unwrap();

        let source: Box<dyn IssueSource> = Box::new(SnapshotSource::new(&path));
        let items = source.sprint_items("42").unwrap();
        let keys: Vec<&str> = items.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["SL-1", "SL-2"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = SnapshotSource::new(dir.path().join("nope.json"));
        assert!(matches!(
            source.sprint_items("42"),
            Err(TrackerError::Io { .. })
        ));
    }

    #[test]
    fn bad_line_reports_snapshot_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprint.jsonl");
        std::fs::write(&path, "{\"key\":\"SL-1\"}\nnot json\n").unwrap();
        let err = SnapshotSource::new(&path).sprint_items("42").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Snapshot {
                source: CoreError::Snapshot { line: 2, .. },
                ..
            }
        ));
        let cause = std::error::Error::source(&err).unwrap();
        assert_eq!(cause.to_string(), "invalid snapshot at line 2");
    }
}
