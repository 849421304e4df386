//! Error types for sysgen-renderer.

use std::path::PathBuf;

use thiserror::Error;

use sysgen_core::ProjectError;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (parse, missing variable, unknown template).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// The model could not be resolved, e.g. a timer whose launcher is gone.
    #[error("project error: {0}")]
    Project(#[from] ProjectError),

    /// Filesystem error while loading template overrides.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
