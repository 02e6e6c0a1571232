//! Trivia CLI - load question boards and play them in the terminal

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "trivia")]
#[command(version)]
#[command(about = "Multi-format trivia board loader and console game")]
#[command(long_about = r#"
Trivia loads question boards from CSV, JSON or XML files and plays them:
  • One canonical question model for every format
  • Letter or free-text answers, scored with signed points
  • Turn-by-turn event log and summary report

Example usage:
  trivia load --file questions.json
  trivia check --file questions.csv --category Geography --value 200 --answer B
  trivia play --file questions.xml --player Ada --player Grace
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file (defaults to ./trivia.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a question file and show the board
    Load {
        /// Question file (.csv, .json or .xml)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Score a single answer against one question
    Check {
        /// Question file (.csv, .json or .xml)
        #[arg(short, long)]
        file: PathBuf,

        /// Category of the question
        #[arg(long)]
        category: String,

        /// Point value of the question
        #[arg(long)]
        value: i32,

        /// Answer to score (choice letter or text)
        #[arg(short, long)]
        answer: String,

        /// Wrong answers score zero instead of losing points
        #[arg(long)]
        no_penalty: bool,
    },

    /// Play a board in the terminal
    Play {
        /// Question file (.csv, .json or .xml)
        #[arg(short, long)]
        file: PathBuf,

        /// Player name (repeat for each player)
        #[arg(short, long = "player", required = true)]
        players: Vec<String>,

        /// Where to append the event log
        #[arg(long)]
        event_log: Option<PathBuf>,

        /// Where to write the summary report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Write a default trivia.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Print a JSON success envelope for `command`
pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    if let Commands::Init { force } = cli.command {
        let path = cli.config.unwrap_or_else(trivia::config::default_config_path);
        return commands::run_init(output_mode, &path, force);
    }

    let config = trivia::config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Load { file } => commands::run_load(output_mode, &config, &file),
        Commands::Check {
            file,
            category,
            value,
            answer,
            no_penalty,
        } => commands::run_check(output_mode, &config, &file, &category, value, &answer, no_penalty),
        Commands::Play {
            file,
            players,
            event_log,
            report,
        } => {
            let event_log = event_log.unwrap_or_else(|| config.event_log_path());
            let report = report.unwrap_or_else(|| config.report_path());
            commands::run_play(output_mode, &config, &file, &players, &event_log, &report)
        }
        Commands::Version => commands::run_version(output_mode),
        Commands::Init { .. } => Ok(()),
    }
}
