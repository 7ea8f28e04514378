//! Discovery and management of the `.sprintload/` directory.
//!
//! The directory holds `config.yaml` and the team roster. It is found by
//! walking up from the working directory, unless `SPRINTLOAD_DIR` points
//! somewhere explicitly.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the project metadata directory.
pub const DIR_NAME: &str = ".sprintload";

/// Environment variable overriding directory discovery.
pub const DIR_ENV: &str = "SPRINTLOAD_DIR";

/// Walk up the directory tree from `start` looking for `.sprintload/`.
///
/// `SPRINTLOAD_DIR` is checked first and wins when it names an existing
/// directory. Returns `None` if the filesystem root is reached.
pub fn find_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    let mut current = start.as_path();
    loop {
        let candidate = current.join(DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => break,
        }
    }

    None
}

/// Like [`find_dir`], but a missing directory is an error.
///
/// # Errors
///
/// Returns [`ConfigError::DirNotFound`] if no `.sprintload/` directory is found.
pub fn find_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_dir(start).ok_or(ConfigError::DirNotFound)
}

/// Ensure a `.sprintload/` directory exists at (or under) `path`.
///
/// If `path` is not itself named `.sprintload`, the directory is created
/// beneath it. Returns the directory path.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if directory creation fails.
pub fn ensure_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(DIR_NAME)
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
