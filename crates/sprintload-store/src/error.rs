//! Store error types.

/// Errors that can occur while reading or writing the roster store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No roster exists for the requested project.
    #[error("project not found: {project}")]
    ProjectNotFound {
        /// The project that was looked up.
        project: String,
    },

    /// The store file could not be read, written, or locked.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file involved.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The store document (or a stored value) did not decode.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the store crate.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Creates a [`StoreError::ProjectNotFound`].
    pub fn project_not_found(project: impl Into<String>) -> Self {
        Self::ProjectNotFound {
            project: project.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Returns `true` if this is a [`StoreError::ProjectNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound { .. })
    }
}
