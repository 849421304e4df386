pub mod add;
pub mod diff;
pub mod generate;
pub mod init;
pub mod list;
pub mod status;

use std::path::Path;

use anyhow::{Context, Result};

use sysgen_core::{store, Project};

/// Load the project stored in `dir`.
pub(crate) fn open_project(dir: &Path) -> Result<Project> {
    let project = store::open(dir)
        .with_context(|| format!("failed to load project in '{}'", dir.display()))?;
    tracing::debug!(
        project = %project.name,
        dir = %dir.display(),
        services = project.services.len(),
        oneshots = project.oneshots.len(),
        timers = project.timers.len(),
        "project loaded"
    );
    Ok(project)
}
