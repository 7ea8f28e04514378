//! Tracker error types.

use std::path::{Path, PathBuf};

use sprintload_core::CoreError;
use thiserror::Error;

/// Errors raised while fetching sprint items.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker answered with a non-success status.
    #[error("tracker returned HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// The request never produced a response.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The response body was not the expected JSON.
    #[error("unexpected response from {url}")]
    Decode {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// No base URL is configured.
    #[error("tracker base URL is not configured (set tracker.base_url in config.yaml)")]
    NotConfigured,

    /// The API token environment variable is unset or empty.
    #[error("tracker API token not set: export {env}")]
    MissingToken { env: String },

    /// A snapshot file could not be opened.
    #[error("cannot open snapshot {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot file did not decode.
    #[error("cannot read snapshot {}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

impl TrackerError {
    /// Maps a ureq failure, turning status errors into [`TrackerError::Http`].
    pub fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => Self::Http {
                status,
                url: url.to_string(),
            },
            source => Self::Transport {
                url: url.to_string(),
                source,
            },
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` for authentication or authorisation rejections.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::MissingToken { .. } | Self::Http { status: 401 | 403, .. }
        )
    }
}

/// A specialized `Result` type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
