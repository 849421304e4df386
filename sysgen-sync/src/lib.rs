//! # sysgen-sync
//!
//! Staging writer and generation orchestration.
//!
//! Call [`generate`] to render every artifact of a project and replace its
//! `generated/` directory in one swap, [`diff_project`] to preview the change
//! as unified diffs, or [`status::check`] to classify what is on disk.

pub mod diff;
pub mod error;
pub mod status;
pub mod writer;

pub use diff::{diff_project, DiffResult, FileDiff};
pub use error::SyncError;
pub use status::{ArtifactState, ArtifactStatus};
pub use writer::{generate, GenerateResult, WriteResult};
