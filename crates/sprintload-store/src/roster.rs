//! [`RosterStore`] -- JSON-file-backed team rosters plus a key-value area.
//!
//! Document layout:
//!
//! ```json
//! {
//!   "projects": { "core": { "members": ["Alice", "Bob"] } },
//!   "kv": { "last_sprint": "42" }
//! }
//! ```
//!
//! The whole document is loaded on open and rewritten on [`RosterStore::save`].
//! Saves take an exclusive lock on a sibling `.lock` file and replace the
//! document through a temp file, so concurrent writers never interleave.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sprintload_core::Team;
use tracing::debug;

use crate::error::{Result, StoreError};

/// File name of the roster document inside `.sprintload/`.
pub const ROSTER_FILE: &str = "teams.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProjectEntry {
    #[serde(default)]
    members: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    projects: BTreeMap<String, ProjectEntry>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    kv: BTreeMap<String, serde_json::Value>,
}

/// Team rosters persisted as one JSON file.
#[derive(Debug)]
pub struct RosterStore {
    path: PathBuf,
    doc: StoreDocument,
}

impl RosterStore {
    /// Opens the store at `path`. A missing or empty file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read, or
    /// [`StoreError::Serialization`] if it is not a valid store document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "opening roster store");

        let doc = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => StoreDocument::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreDocument::default(),
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        Ok(Self { path, doc })
    }

    /// Opens `teams.json` inside a `.sprintload/` directory.
    pub fn open_in(dir: &Path) -> Result<Self> {
        Self::open(dir.join(ROSTER_FILE))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the document back to disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the lock, temp file, or rename fails.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let lock_path = self.path.with_extension("json.lock");
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| StoreError::io(&lock_path, e))?;
        FileExt::lock_exclusive(&lock).map_err(|e| StoreError::io(&lock_path, e))?;

        let json = serde_json::to_string_pretty(&self.doc)?;
        let tmp_path = self.path.with_extension("json.tmp");
        let written = fs::File::create(&tmp_path)
            .and_then(|mut f| {
                f.write_all(json.as_bytes())?;
                f.write_all(b"\n")?;
                f.sync_all()
            })
            .and_then(|()| fs::rename(&tmp_path, &self.path));

        let unlocked = FileExt::unlock(&lock);
        written.map_err(|e| StoreError::io(&self.path, e))?;
        unlocked.map_err(|e| StoreError::io(&lock_path, e))?;

        debug!(
            path = %self.path.display(),
            projects = self.doc.projects.len(),
            "saved roster store"
        );
        Ok(())
    }

    // -- Teams ---------------------------------------------------------------

    /// Project names, sorted.
    pub fn projects(&self) -> Vec<&str> {
        self.doc.projects.keys().map(String::as_str).collect()
    }

    /// Returns `true` if a roster exists for `project`.
    pub fn has_team(&self, project: &str) -> bool {
        self.doc.projects.contains_key(project)
    }

    /// The roster for `project`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] if the project has no roster.
    pub fn team(&self, project: &str) -> Result<Team> {
        let entry = self
            .doc
            .projects
            .get(project)
            .ok_or_else(|| StoreError::project_not_found(project))?;
        Ok(Team::new(project, entry.members.iter().cloned()))
    }

    /// Inserts or replaces a roster.
    pub fn upsert_team(&mut self, team: &Team) {
        self.doc.projects.insert(
            team.project.clone(),
            ProjectEntry {
                members: team.members.clone(),
            },
        );
    }

    /// Adds members to `project`, creating the roster if needed.
    /// Returns how many names were new.
    pub fn add_members<I, S>(&mut self, project: &str, members: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut team = self
            .team(project)
            .unwrap_or_else(|_| Team::new(project, Vec::<String>::new()));
        let added = members
            .into_iter()
            .map(Into::<String>::into)
            .filter(|m| team.add(m.as_str()))
            .count();
        self.upsert_team(&team);
        added
    }

    /// Removes members from `project`. Returns how many were on the roster.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] if the project has no roster.
    pub fn remove_members<'a, I>(&mut self, project: &str, members: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut team = self.team(project)?;
        let removed = members.into_iter().filter(|m| team.remove(m)).count();
        self.upsert_team(&team);
        Ok(removed)
    }

    /// Deletes a whole roster, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] if the project has no roster.
    pub fn remove_team(&mut self, project: &str) -> Result<Team> {
        let entry = self
            .doc
            .projects
            .remove(project)
            .ok_or_else(|| StoreError::project_not_found(project))?;
        Ok(Team::new(project, entry.members))
    }

    // -- Key-value -----------------------------------------------------------

    /// Reads and decodes a stored value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the value does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.doc.kv.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Stores a value under `key`, replacing any previous value.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.doc.kv.insert(key.to_string(), value);
        Ok(())
    }

    /// Deletes `key`. Returns `true` if it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.doc.kv.remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::open_in(dir.path()).unwrap();
        assert!(store.projects().is_empty());
    }

    #[test]
    fn unknown_project_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::open_in(dir.path()).unwrap();
        let err = store.team("ghost").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "project not found: ghost");
    }

    #[test]
    fn save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RosterStore::open_in(dir.path()).unwrap();
        assert_eq!(store.add_members("core", ["Alice", "Bob", "Alice"]), 2);
        store.upsert_team(&Team::new("web", ["Carol"]));
        store.set("last_sprint", &"42").unwrap();
        store.save().unwrap();

        let reopened = RosterStore::open_in(dir.path()).unwrap();
        assert_eq!(reopened.projects(), vec!["core", "web"]);
        assert_eq!(reopened.team("core").unwrap().members, vec!["Alice", "Bob"]);
        assert_eq!(
            reopened.get::<String>("last_sprint").unwrap().as_deref(),
            Some("42")
        );
        assert!(!dir.path().join("teams.json.tmp").exists());
    }

    #[test]
    fn add_members_takes_owned_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RosterStore::open_in(dir.path()).unwrap();
        let names = vec!["Alice".to_string(), " Bob ".to_string(), String::new()];
        assert_eq!(store.add_members("core", names), 2);
        assert_eq!(store.add_members("core", vec!["Bob".to_string()]), 0);
        assert_eq!(store.team("core").unwrap().members, vec!["Alice", "Bob"]);
    }

    #[test]
    fn remove_members_and_team() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RosterStore::open_in(dir.path()).unwrap();
        store.add_members("core", ["Alice", "Bob"]);

        assert_eq!(store.remove_members("core", ["Bob", "Zed"]).unwrap(), 1);
        assert_eq!(store.team("core").unwrap().members, vec!["Alice"]);
        assert!(store.remove_members("ghost", ["Bob"]).is_err());

        let removed = store.remove_team("core").unwrap();
        assert_eq!(removed.members, vec!["Alice"]);
        assert!(!store.has_team("core"));
        assert!(store.remove_team("core").is_err());
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ROSTER_FILE), "{not json").unwrap();
        assert!(matches!(
            RosterStore::open_in(dir.path()),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn kv_delete_and_type_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RosterStore::open_in(dir.path()).unwrap();
        store.set("count", &3).unwrap();
        assert!(store.get::<Vec<String>>("count").is_err());
        assert!(store.delete("count"));
        assert!(!store.delete("count"));
        assert_eq!(store.get::<i32>("count").unwrap(), None);
    }
}
