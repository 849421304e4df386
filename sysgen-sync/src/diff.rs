//! Dry-run unified diff support for `sysgen diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use sysgen_core::Project;

use crate::writer::{orphans, read_existing, render_checked};
use crate::SyncError;

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diff result for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub project_name: String,
    pub diffs: Vec<FileDiff>,
}

/// Render what `generate` would produce and compare it to `generated/`.
///
/// Files that generation would delete appear as full removals. No files are
/// written.
pub fn diff_project(project: &Project) -> Result<DiffResult, SyncError> {
    let artifacts = render_checked(project)?;

    let mut diffs = Vec::new();
    for artifact in &artifacts {
        let path = artifact.path();
        let existing = read_existing(&path)?.unwrap_or_default();
        if existing == artifact.content.as_bytes() {
            continue;
        }
        let old = String::from_utf8_lossy(&existing);
        diffs.push(file_diff(project.dir(), path, &old, &artifact.content));
    }
    for path in orphans(&project.generated_dir(), &artifacts)? {
        let existing = read_existing(&path)?.unwrap_or_default();
        diffs.push(file_diff(project.dir(), path, &String::from_utf8_lossy(&existing), ""));
    }

    Ok(DiffResult {
        project_name: project.name.clone(),
        diffs,
    })
}

fn file_diff(root: &Path, path: PathBuf, old: &str, new: &str) -> FileDiff {
    let relative = path.strip_prefix(root).unwrap_or(path.as_path());
    let old_header = format!("a/{}", relative.display());
    let new_header = format!("b/{}", relative.display());
    let unified_diff = TextDiff::from_lines(old, new)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();
    FileDiff { path, unified_diff }
}
