//! Runtime context for command execution.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use sprintload_config::{SprintloadConfig, find_dir_or_error, load_config};
use sprintload_store::RosterStore;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit project directory from `--dir`.
    pub dir: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            dir: global.dir.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// The `.sprintload/` directory: `--dir`, else `$SPRINTLOAD_DIR`, else
    /// the nearest one above the working directory.
    pub fn require_dir(&self) -> Result<PathBuf> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => {
                let cwd = env::current_dir().context("failed to get current directory")?;
                find_dir_or_error(&cwd)?
            }
        };
        if !dir.is_dir() {
            anyhow::bail!(
                "project directory does not exist: {}\nHint: run 'sprintload init' to create it",
                dir.display()
            );
        }
        Ok(dir)
    }

    /// Loads the layered configuration of the project directory.
    pub fn config(&self) -> Result<(PathBuf, SprintloadConfig)> {
        let dir = self.require_dir()?;
        let config = load_config(&dir)
            .with_context(|| format!("failed to load config from {}", dir.display()))?;
        Ok((dir, config))
    }

    /// Opens the roster store of the project directory.
    pub fn roster(&self) -> Result<RosterStore> {
        let dir = self.require_dir()?;
        RosterStore::open_in(&dir)
            .with_context(|| format!("failed to open team roster in {}", dir.display()))
    }
}
