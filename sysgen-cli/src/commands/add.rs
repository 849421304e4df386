//! `sysgen add service|oneshot|timer`

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sysgen_core::{store, Environment, OneShot, Service, Upsert};

use super::open_project;

/// Add or replace an entity. An existing entity with the same name is
/// replaced in place.
#[derive(Subcommand, Debug)]
pub enum AddCommand {
    /// A long-running process restarted by systemd.
    Service(ServiceArgs),

    /// A run-to-completion task, usually launched by a timer.
    Oneshot(OneShotArgs),

    /// A timer that periodically launches a one-shot.
    Timer(TimerArgs),
}

#[derive(Args, Debug)]
pub struct ServiceArgs {
    /// Service name, unique among the project's services.
    pub name: String,

    /// Executable; resolved against PATH when generating.
    pub command: String,

    /// Arguments passed to the executable.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Store as a one-shot instead of a service.
    #[arg(long)]
    pub once: bool,

    /// systemd restart policy.
    #[arg(long, env = "SYSGEN_RESTART", default_value = sysgen_core::types::DEFAULT_RESTART)]
    pub restart: String,

    /// Seconds to wait before restarting.
    #[arg(long, env = "SYSGEN_RESTART_SEC", default_value_t = sysgen_core::types::DEFAULT_RESTART_SEC)]
    pub restart_sec: u32,

    /// Environment variable for the process, as KEY=VALUE. Repeatable.
    #[arg(long = "environment", short = 'e', value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub environment: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct OneShotArgs {
    /// One-shot name, unique among the project's one-shots.
    pub name: String,

    /// Executable; resolved against PATH when generating.
    pub command: String,

    /// Arguments passed to the executable.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Environment variable for the process, as KEY=VALUE. Repeatable.
    #[arg(long = "environment", short = 'e', value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub environment: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct TimerArgs {
    /// Name of the one-shot to launch.
    pub launcher: String,

    /// Delay after the launcher finishes, in systemd time span syntax (e.g. "1d", "15min").
    pub interval: String,

    /// Timer name. Defaults to `<launcher>-timer-<interval>`.
    #[arg(long, env = "SYSGEN_TIMER_NAME")]
    pub name: Option<String>,
}

pub fn run(cmd: AddCommand, dir: &Path) -> Result<()> {
    match cmd {
        AddCommand::Service(args) if args.once => add_oneshot(
            OneShotArgs {
                name: args.name,
                command: args.command,
                args: args.args,
                environment: args.environment,
            },
            dir,
        ),
        AddCommand::Service(args) => add_service(args, dir),
        AddCommand::Oneshot(args) => add_oneshot(args, dir),
        AddCommand::Timer(args) => add_timer(args, dir),
    }
}

fn add_service(args: ServiceArgs, dir: &Path) -> Result<()> {
    let mut project = open_project(dir)?;
    sysgen_core::validate_name(&args.name)?;
    sysgen_core::validate_value("restart", &args.restart)?;
    let service = Service {
        name: args.name,
        exec_start: args.command,
        args: args.args,
        restart: args.restart,
        restart_sec: args.restart_sec,
        environment: collect_environment(args.environment),
    };
    let slug = service.slug(&project);
    let name = service.name.clone();
    let outcome = project.upsert_service(service);
    store::save(&project).context("failed to save project")?;
    report(outcome, "service", &name, slug.as_str());
    Ok(())
}

fn add_oneshot(args: OneShotArgs, dir: &Path) -> Result<()> {
    let mut project = open_project(dir)?;
    sysgen_core::validate_name(&args.name)?;
    let oneshot = OneShot {
        name: args.name,
        exec_start: args.command,
        args: args.args,
        environment: collect_environment(args.environment),
    };
    let slug = oneshot.slug(&project);
    let name = oneshot.name.clone();
    let outcome = project.upsert_oneshot(oneshot);
    store::save(&project).context("failed to save project")?;
    report(outcome, "oneshot", &name, slug.as_str());
    Ok(())
}

fn add_timer(args: TimerArgs, dir: &Path) -> Result<()> {
    let mut project = open_project(dir)?;
    let (outcome, name) = project.add_timer(args.name, &args.launcher, &args.interval)?;
    store::save(&project).context("failed to save project")?;
    let slug = project.entity_slug(&name);
    report(outcome, "timer", &name, slug.as_str());
    Ok(())
}

fn report(outcome: Upsert, kind: &str, name: &str, slug: &str) {
    let verb = match outcome {
        Upsert::Inserted => "Added",
        Upsert::Replaced => "Replaced",
    };
    println!("✓ {verb} {kind} '{name}' ({slug})");
}

fn collect_environment(pairs: Vec<(String, String)>) -> Environment {
    pairs.into_iter().collect()
}

fn parse_env_pair(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
