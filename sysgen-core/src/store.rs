//! JSON project store.
//!
//! # Storage layout
//!
//! ```text
//! <project-dir>/
//!   system.json      (the whole project, rewritten on every save)
//!   templates/       (optional .tera overrides)
//!   generated/       (render output, replaced by `generate`)
//! ```
//!
//! Saves are atomic: serialize → `system.json.tmp` → `rename`.

use std::path::Path;

use crate::error::{io_err, ProjectError};
use crate::paths;
use crate::project::Project;

/// Load the project stored in `dir`.
///
/// Returns `ProjectError::StoreNotFound` if `dir/system.json` is absent,
/// `ProjectError::Parse` (with path) if it is malformed, and the errors of
/// [`Project::validate`] for bad names, settings or duplicates.
pub fn open(dir: &Path) -> Result<Project, ProjectError> {
    let path = paths::store_path(dir);
    if !path.exists() {
        return Err(ProjectError::StoreNotFound { path });
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    let mut project: Project =
        serde_json::from_str(&contents).map_err(|e| ProjectError::Parse { path, source: e })?;
    project.validate()?;
    project.set_dir(dir);
    Ok(project)
}

/// Atomically write `project` to its own directory.
pub fn save(project: &Project) -> Result<(), ProjectError> {
    let dir = project.dir();
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let path = paths::store_path(dir);
    let tmp = dir.join(paths::STORE_TMP_FILE);

    let mut json = serde_json::to_string_pretty(project)?;
    json.push('\n');
    std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, &path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(&path, e));
    }
    Ok(())
}

/// Create an empty project named `name` in `dir`.
///
/// Idempotent: if `dir` already holds a store it is loaded and returned
/// unchanged, with `false` as the second element.
pub fn init_at(name: &str, dir: &Path) -> Result<(Project, bool), ProjectError> {
    if paths::store_path(dir).exists() {
        return Ok((open(dir)?, false));
    }
    let project = Project::new(name, dir)?;
    save(&project)?;
    Ok((project, true))
}
