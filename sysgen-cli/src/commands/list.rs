//! `sysgen list`: show the entities of a project.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use sysgen_core::Project;

use super::open_project;

/// Arguments for `sysgen list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ServiceRow {
    name: String,
    slug: String,
    command: String,
    restart: String,
    #[tabled(rename = "restart sec")]
    restart_sec: u32,
}

#[derive(Debug, Serialize, Tabled)]
struct OneShotRow {
    name: String,
    slug: String,
    command: String,
}

#[derive(Debug, Serialize, Tabled)]
struct TimerRow {
    name: String,
    slug: String,
    launcher: String,
    interval: String,
}

#[derive(Debug, Serialize)]
struct Listing {
    project: String,
    slug: String,
    services: Vec<ServiceRow>,
    oneshots: Vec<OneShotRow>,
    timers: Vec<TimerRow>,
}

impl ListArgs {
    pub fn run(self, dir: &Path) -> Result<()> {
        let project = open_project(dir)?;
        let listing = build_listing(&project);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&listing).context("failed to serialize listing")?
            );
            return Ok(());
        }

        println!("{} ({})", listing.project.bold(), listing.slug);
        print_section("Services", listing.services);
        print_section("One-shots", listing.oneshots);
        print_section("Timers", listing.timers);
        Ok(())
    }
}

fn build_listing(project: &Project) -> Listing {
    Listing {
        project: project.name.clone(),
        slug: project.slug().0,
        services: project
            .services
            .iter()
            .map(|s| ServiceRow {
                name: s.name.clone(),
                slug: s.slug(project).0,
                command: command_line(&s.exec_start, &s.args),
                restart: s.restart.clone(),
                restart_sec: s.restart_sec,
            })
            .collect(),
        oneshots: project
            .oneshots
            .iter()
            .map(|o| OneShotRow {
                name: o.name.clone(),
                slug: o.slug(project).0,
                command: command_line(&o.exec_start, &o.args),
            })
            .collect(),
        timers: project
            .timers
            .iter()
            .map(|t| TimerRow {
                name: t.name.clone(),
                slug: t.slug(project).0,
                launcher: t.launcher.clone(),
                interval: t.interval.clone(),
            })
            .collect(),
    }
}

fn command_line(exec: &str, args: &[String]) -> String {
    std::iter::once(exec)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_section<T: Tabled>(title: &str, rows: Vec<T>) {
    if rows.is_empty() {
        println!("{title}: none");
        return;
    }
    println!("{title}:");
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
