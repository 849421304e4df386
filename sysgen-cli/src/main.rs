//! sysgen: systemd unit generator for multi-process projects.
//!
//! # Usage
//!
//! ```text
//! sysgen init <name> [directory]
//! sysgen add service <name> <command> [args...] [--once] [--restart <policy>] [--restart-sec <n>] [-e KEY=VALUE]...
//! sysgen add oneshot <name> <command> [args...] [-e KEY=VALUE]...
//! sysgen add timer <launcher> <interval> [--name <name>]
//! sysgen generate [--dry-run]
//! sysgen diff
//! sysgen status [--json]
//! sysgen list [--json]
//! ```
//!
//! Every command except `init` works on the project in `--dir` (default `.`).

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    add::AddCommand, diff::DiffArgs, generate::GenerateArgs, init::InitArgs, list::ListArgs,
    status::StatusArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "sysgen",
    version,
    about = "Generate systemd units and install scripts for a group of processes",
    long_about = None,
)]
struct Cli {
    /// Project directory holding system.json.
    #[arg(long, short = 'C', global = true, env = "SYSGEN_DIR", default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new, empty project.
    Init(InitArgs),

    /// Add or replace a service, one-shot or timer.
    Add {
        #[command(subcommand)]
        command: AddCommand,
    },

    /// Render every unit and script into generated/.
    Generate(GenerateArgs),

    /// Show a unified diff of what generate would change.
    Diff(DiffArgs),

    /// Compare generated/ against a fresh render.
    Status(StatusArgs),

    /// List the services, one-shots and timers of the project.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(&cli.dir),
        Commands::Add { command } => commands::add::run(command, &cli.dir),
        Commands::Generate(args) => args.run(&cli.dir),
        Commands::Diff(args) => args.run(&cli.dir),
        Commands::Status(args) => args.run(&cli.dir),
        Commands::List(args) => args.run(&cli.dir),
    }
}

/// Diagnostics go to stderr, filtered by `SYSGEN_LOG` (default `warn`).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_env("SYSGEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
