//! CLI Adapter.

mod job;
mod prompt;
mod resource;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::app::AppContext;
use crate::domain::AppError;
use crate::domain::configuration::load_config;
use crate::services::HttpApiClient;

#[derive(Parser)]
#[command(name = "evalctl")]
#[command(version)]
#[command(about = "Render prompt templates and drive evaluation jobs", long_about = None)]
struct Cli {
    /// Path to the config file (default: ./evalctl.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the placeholders of a prompt template
    Vars {
        #[command(flatten)]
        source: prompt::SourceArgs,
    },
    /// Render the system and user prompts of a template
    #[clap(visible_alias = "r")]
    Render {
        #[command(flatten)]
        source: prompt::SourceArgs,
        /// Placeholder binding as name=value (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
        /// Emit plain JSON for a text-generation API instead of display text
        #[arg(long)]
        machine: bool,
        /// TOML table of system config codes used instead of the backend's
        #[arg(long, value_name = "PATH")]
        defaults: Option<PathBuf>,
    },
    /// Render a stored template and run it through an AI model
    #[clap(visible_alias = "gen")]
    Generate {
        /// Prompt template id
        #[arg(long)]
        id: String,
        /// AI model id
        #[arg(long)]
        model: String,
        /// Placeholder binding as name=value (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
    },
    /// Start a test task or evaluation
    Start {
        /// Job kind (test-task, evaluation)
        kind: String,
        id: String,
        /// Follow the job until it ends
        #[arg(short, long)]
        watch: bool,
    },
    /// Poll a job until it ends
    #[clap(visible_alias = "w")]
    Watch {
        /// Job kind (test-task, evaluation)
        kind: String,
        id: String,
        /// Poll interval in milliseconds (default: polling.interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Stop after this many non-terminal status reports
        #[arg(long)]
        max_ticks: Option<usize>,
    },
    /// Follow the first running job of a kind
    WatchRunning {
        /// Job kind (test-task, evaluation)
        kind: String,
    },
    /// Show the current status of a job
    Status {
        /// Job kind (test-task, evaluation)
        kind: String,
        id: String,
    },
    /// Restart a stalled or failed job
    Restart {
        /// Job kind (test-task, evaluation)
        kind: String,
        id: String,
        /// Bypass the backend's staleness guard
        #[arg(long, conflicts_with = "normal")]
        force: bool,
        /// Restart without asking, subject to the staleness guard
        #[arg(long, conflicts_with = "force")]
        normal: bool,
    },
    /// Cancel a running test task
    Cancel {
        /// Test task id
        id: String,
    },
    /// Mark stale running jobs of a kind as failed
    CheckTimeout {
        /// Job kind (test-task, evaluation)
        kind: String,
    },
    /// CRUD over backend collections
    #[clap(visible_alias = "res")]
    Resource {
        #[command(subcommand)]
        command: resource::ResourceCommands,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Vars { source } => prompt::run_vars(config, source).map(|_| 0),
        Commands::Render { source, vars, machine, defaults } => {
            prompt::run_render(config, source, vars, machine, defaults).map(|_| 0)
        }
        Commands::Generate { id, model, vars } => {
            prompt::run_generate(config, &id, &model, vars).map(|_| 0)
        }
        Commands::Start { kind, id, watch } => job::run_start(config, &kind, id, watch),
        Commands::Watch { kind, id, interval_ms, max_ticks } => {
            job::run_watch(config, &kind, id, interval_ms, max_ticks)
        }
        Commands::WatchRunning { kind } => job::run_watch_running(config, &kind),
        Commands::Status { kind, id } => job::run_status(config, &kind, id).map(|_| 0),
        Commands::Restart { kind, id, force, normal } => {
            job::run_restart(config, &kind, id, force, normal).map(|_| 0)
        }
        Commands::Cancel { id } => job::run_cancel(config, id).map(|_| 0),
        Commands::CheckTimeout { kind } => job::run_check_timeout(config, &kind).map(|_| 0),
        Commands::Resource { command } => resource::run_resource(config, command).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn connect(config_path: Option<&Path>) -> Result<AppContext<HttpApiClient>, AppError> {
    AppContext::connect(load_config(config_path)?)
}

fn print_json(value: &serde_json::Value) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
