//! Error types for sysgen-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from project model and store operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (save path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parse error on load: includes the store path.
    #[error("failed to parse project store at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The directory has no `system.json`.
    #[error("project store not found at {path}; run `sysgen init` first")]
    StoreNotFound { path: PathBuf },

    /// A timer references a one-shot that is not part of the project.
    #[error("one-shot '{launcher}' that should be launched not found")]
    LauncherNotFound { launcher: String },

    /// A name that produces an empty slug or contains control characters.
    #[error("invalid name {name:?}: must contain an ASCII letter or digit and no control characters")]
    InvalidName { name: String },

    /// A unit setting that is blank or would span more than one line.
    #[error("invalid {field} {value:?}: must be non-empty and contain no control characters")]
    InvalidValue { field: &'static str, value: String },

    /// A hand-edited store listing the same name twice in one collection.
    #[error("duplicate {kind} '{name}' in project store")]
    DuplicateName { kind: &'static str, name: String },
}

/// Convenience constructor for [`ProjectError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ProjectError {
    ProjectError::Io {
        path: path.into(),
        source,
    }
}
