//! Staging writer and generation orchestration.
//!
//! ## `generate` protocol
//!
//! 1. Render every artifact in memory; any failure aborts before disk is touched.
//! 2. Reject two artifacts with the same file name.
//! 3. Remove a leftover `generated.tmp/` from a crashed run.
//! 4. Write every artifact into `generated.tmp/` with its mode.
//! 5. Rename `generated/` aside to `generated.old/`, rename staging in.
//! 6. Delete `generated.old/`.
//!
//! A failure in steps 3–5 removes the staging directory and leaves the
//! previous `generated/` as it was.

use std::collections::{BTreeSet, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sysgen_core::{paths, Project};
use sysgen_renderer::{Artifact, Renderer};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// Rendered content matches the file already in `generated/`.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// Outcome of generating one project.
#[derive(Debug)]
pub struct GenerateResult {
    pub project_name: String,
    pub output_dir: PathBuf,
    pub writes: Vec<WriteResult>,
    /// Files of the previous `generated/` no longer produced by the model.
    /// Deleted by the swap, or only reported in dry-run mode.
    pub removed: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Render every artifact of `project` with its template overrides and check
/// that no two share a file name.
pub(crate) fn render_checked(project: &Project) -> Result<Vec<Artifact>, SyncError> {
    let renderer = Renderer::for_project(project)?;
    let artifacts = renderer.render_all(project)?;
    let mut seen = HashSet::new();
    for artifact in &artifacts {
        if !seen.insert(artifact.file_name.as_str()) {
            return Err(SyncError::DuplicateArtifact {
                name: artifact.file_name.clone(),
            });
        }
    }
    Ok(artifacts)
}

/// Raw bytes of `path`, or `None` if it does not exist.
///
/// Bytes rather than text so a hand-edited file that is not UTF-8 compares
/// as modified instead of failing.
pub(crate) fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, SyncError> {
    match std::fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Files in `dir` that none of `artifacts` would produce, sorted by name.
pub(crate) fn orphans(dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>, SyncError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
        Err(err) => return Err(io_err(dir, err)),
    };
    let expected: HashSet<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
    let mut found = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !expected.contains(name.as_str()) {
            found.insert(entry.path());
        }
    }
    Ok(found.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Staged writes
// ---------------------------------------------------------------------------

fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<(), SyncError> {
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.content).map_err(|e| io_err(&path, e))?;
    set_mode(&path, artifact.executable)?;
    tracing::debug!(path = %path.display(), "staged");
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, executable: bool) -> Result<(), SyncError> {
    use std::os::unix::fs::PermissionsExt;
    let mode = if executable { 0o755 } else { 0o644 };
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _executable: bool) -> Result<(), SyncError> {
    Ok(())
}

fn remove_dir_if_exists(dir: &Path) -> Result<(), SyncError> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_err(dir, err)),
    }
}

fn stage(staging: &Path, artifacts: &[Artifact]) -> Result<(), SyncError> {
    std::fs::create_dir_all(staging).map_err(|e| io_err(staging, e))?;
    for artifact in artifacts {
        write_artifact(staging, artifact)?;
    }
    Ok(())
}

/// Replace `output` with `staging`, keeping the old tree in `retired` until
/// the new one is in place.
fn swap(output: &Path, staging: &Path, retired: &Path) -> Result<(), SyncError> {
    remove_dir_if_exists(retired)?;
    let had_output = output.exists();
    if had_output {
        std::fs::rename(output, retired).map_err(|e| io_err(output, e))?;
    }
    if let Err(e) = std::fs::rename(staging, output) {
        if had_output {
            restore_previous(retired, output);
        }
        return Err(io_err(output, e));
    }
    if let Err(e) = remove_dir_if_exists(retired) {
        tracing::warn!(error = %e, "could not remove previous output");
    }
    Ok(())
}

/// Move `retired` back to `output` after a failed swap.
fn restore_previous(retired: &Path, output: &Path) {
    if let Err(e) = std::fs::rename(retired, output) {
        tracing::warn!(
            error = %e,
            retired = %retired.display(),
            output = %output.display(),
            "could not restore previous output"
        );
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

/// Render every artifact of `project` and replace its `generated/` directory.
///
/// With `dry_run` nothing is written; each artifact is reported as
/// [`WriteResult::WouldWrite`] or [`WriteResult::Unchanged`].
pub fn generate(project: &Project, dry_run: bool) -> Result<GenerateResult, SyncError> {
    let artifacts = render_checked(project)?;
    let output = project.generated_dir();

    let mut writes = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        let path = artifact.path();
        let unchanged = read_existing(&path)?.as_deref() == Some(artifact.content.as_bytes());
        writes.push(match (unchanged, dry_run) {
            (true, _) => WriteResult::Unchanged { path },
            (false, true) => WriteResult::WouldWrite { path },
            (false, false) => WriteResult::Written { path },
        });
    }
    let removed = orphans(&output, &artifacts)?;

    if dry_run {
        for write in &writes {
            if let WriteResult::WouldWrite { path } = write {
                tracing::info!("[dry-run] would write: {}", path.display());
            }
        }
    } else {
        let staging = paths::staging_dir(project.dir());
        let retired = paths::retired_dir(project.dir());
        remove_dir_if_exists(&staging)?;
        let staged = stage(&staging, &artifacts).and_then(|()| swap(&output, &staging, &retired));
        if let Err(e) = staged {
            let _ = std::fs::remove_dir_all(&staging);
            return Err(e);
        }
        tracing::info!(
            project = %project.name,
            artifacts = artifacts.len(),
            output = %output.display(),
            "generated"
        );
    }

    Ok(GenerateResult {
        project_name: project.name.clone(),
        output_dir: output,
        writes,
        removed,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
