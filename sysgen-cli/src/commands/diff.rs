//! `sysgen diff`: show unified diffs for what generate would write.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use sysgen_sync::diff_project;

use super::open_project;

/// Arguments for `sysgen diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {}

impl DiffArgs {
    pub fn run(self, dir: &Path) -> Result<()> {
        let project = open_project(dir)?;
        let result = diff_project(&project)
            .with_context(|| format!("diff failed for '{}'", project.name))?;

        if result.diffs.is_empty() {
            println!("No differences for '{}'.", result.project_name);
            return Ok(());
        }

        for diff in result.diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
