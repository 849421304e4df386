//! `sysgen generate`: render every unit and script into `generated/`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use sysgen_sync::{generate, WriteResult};

use super::open_project;

/// Arguments for `sysgen generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Show what would be written without touching generated/.
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn run(self, dir: &Path) -> Result<()> {
        let project = open_project(dir)?;
        let result = generate(&project, self.dry_run)
            .with_context(|| format!("generate failed for '{}'", project.name))?;
        print_results(&result.project_name, &result.writes, &result.removed, self.dry_run);
        if !self.dry_run {
            println!(
                "Install with: sudo {}",
                result.output_dir.join("install.sh").display()
            );
        }
        Ok(())
    }
}

fn print_results(project_name: &str, writes: &[WriteResult], removed: &[PathBuf], dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let written = writes
        .iter()
        .filter(|r| {
            matches!(
                r,
                WriteResult::Written { .. } | WriteResult::WouldWrite { .. }
            )
        })
        .count();
    let unchanged = writes.len() - written;

    if written == 0 && removed.is_empty() {
        println!("{prefix}✓ '{project_name}': nothing to do");
        return;
    }

    println!(
        "{prefix}✓ '{project_name}' generated ({written} written, {unchanged} unchanged, {} removed)",
        removed.len()
    );

    for r in writes {
        match r {
            WriteResult::Written { path } => println!("  {}  {}", "✎".green(), path.display()),
            WriteResult::WouldWrite { path } => println!("  {}  {}", "~".yellow(), path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        }
    }
    for path in removed {
        println!("  {}  {}", "✗".red(), path.display());
    }
}
