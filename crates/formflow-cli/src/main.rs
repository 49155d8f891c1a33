// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;

use clap::{Parser, Subcommand};
use formflow_core::ExitCode;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

#[derive(Parser)]
#[command(name = "formflow")]
#[command(about = "FormFlow operations CLI")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the organization's departments, levels and designations.
    SeedMaster {
        #[arg(long)]
        db: PathBuf,
        /// Replace existing master data instead of keeping it.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Publish every unpublished form.
    PublishAll {
        #[arg(long)]
        db: PathBuf,
    },
    /// Show which published forms each employee can see.
    DebugTargeting {
        #[arg(long)]
        db: PathBuf,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        level_override: Option<String>,
    },
    /// Print or write the OpenAPI document.
    Openapi {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_tracing();
    match run(cli) {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            eprintln!("{err}");
            ProcessExitCode::from(err.exit_code() as u8)
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    let output = match cli.command {
        Commands::SeedMaster { db, force } => commands::seed_master(&db, force)?,
        Commands::PublishAll { db } => commands::publish_all(&db)?,
        Commands::DebugTargeting {
            db,
            email,
            level_override,
        } => commands::debug_targeting(&db, email.as_deref(), level_override)?,
        Commands::Openapi { out } => commands::openapi(out.as_deref())?,
    };
    commands::emit(&output, cli.json)
}
