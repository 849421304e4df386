//! `sysgen init <name> [directory]`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use sysgen_core::{store, validate_name, Slug};

/// Create a new, empty project.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name (e.g. "Demo"). Its slug prefixes every unit file.
    pub name: String,

    /// Directory to create the project in. Defaults to `<dir>/<slug>`.
    pub directory: Option<PathBuf>,
}

impl InitArgs {
    pub fn run(self, base: &Path) -> Result<()> {
        validate_name(&self.name)?;
        let dir = self
            .directory
            .unwrap_or_else(|| base.join(Slug::of(&self.name).as_str()));

        let (project, created) = store::init_at(&self.name, &dir)
            .with_context(|| format!("failed to init project in '{}'", dir.display()))?;

        if created {
            println!("✓ Created project '{}'", project.name);
        } else {
            println!("· Project '{}' already exists", project.name);
        }
        println!("  Saved to: {}", project.store_path().display());
        Ok(())
    }
}
