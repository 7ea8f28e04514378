//! Configuration management for the sprintload system.
//!
//! This crate discovers the `.sprintload/` project directory, and loads and
//! saves `.sprintload/config.yaml` layered with `SPRINTLOAD_*` environment
//! variables.

pub mod config;
pub mod project_dir;

pub use config::{
    CONFIG_FILE, ConfigError, SprintloadConfig, TrackerConfig, load_config, save_config,
};
pub use project_dir::{ensure_dir, find_dir, find_dir_or_error};
