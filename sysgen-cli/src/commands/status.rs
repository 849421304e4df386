//! `sysgen status`: compare `generated/` with a fresh render.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use sysgen_sync::{
    status::{check, is_clean},
    ArtifactState, ArtifactStatus,
};

use super::open_project;

/// Arguments for `sysgen status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self, dir: &Path) -> Result<()> {
        let project = open_project(dir)?;
        let statuses = check(&project)
            .with_context(|| format!("status check failed for '{}'", project.name))?;

        if self.json {
            print_json(&project.name, &statuses)?;
            return Ok(());
        }

        print_table(&project.name, statuses);
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusReportJson<'a> {
    project: &'a str,
    clean: bool,
    artifacts: &'a [ArtifactStatus],
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "file")]
    file: String,
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "status")]
    status: String,
}

fn print_json(project: &str, statuses: &[ArtifactStatus]) -> Result<()> {
    let payload = StatusReportJson {
        project,
        clean: is_clean(statuses),
        artifacts: statuses,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(project: &str, statuses: Vec<ArtifactStatus>) {
    let clean = is_clean(&statuses);
    let pending = statuses
        .iter()
        .filter(|s| s.state != ArtifactState::Current)
        .count();
    println!(
        "sysgen v{} | project '{}' | {} artifacts | {} pending",
        env!("CARGO_PKG_VERSION"),
        project,
        statuses.len(),
        pending,
    );

    let separator = "■".repeat(48).bright_black().to_string();
    println!("{separator}");
    println!(
        "Indicators: {} CURRENT  {} MODIFIED  {} MISSING  {} ORPHAN",
        indicator(ArtifactState::Current),
        indicator(ArtifactState::Modified),
        indicator(ArtifactState::Missing),
        indicator(ArtifactState::Orphan),
    );
    println!("{separator}");

    let rows: Vec<StatusTableRow> = statuses
        .into_iter()
        .map(|s| StatusTableRow {
            file: s.file_name,
            kind: s.kind.unwrap_or("-").to_string(),
            status: format!("{} {}", indicator(s.state), s.state),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if !clean {
        println!("Run 'sysgen generate' to update generated/.");
    }
}

fn indicator(state: ArtifactState) -> String {
    match state {
        ArtifactState::Current => "■".green().bold().to_string(),
        ArtifactState::Modified => "■".red().bold().to_string(),
        ArtifactState::Missing => "■".yellow().bold().to_string(),
        ArtifactState::Orphan => "■".magenta().bold().to_string(),
    }
}
