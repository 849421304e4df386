//! Error types for sysgen-sync.

use std::path::PathBuf;

use thiserror::Error;

use sysgen_core::ProjectError;
use sysgen_renderer::RenderError;

/// All errors that can arise from generation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An error from the project model or store.
    #[error("project error: {0}")]
    Project(#[from] ProjectError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two artifacts would be written to the same file.
    #[error("two units render to the same file '{name}'; rename one of them")]
    DuplicateArtifact { name: String },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
