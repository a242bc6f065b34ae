//! space-quiz CLI
//!
//! Play a shuffled multiple-choice space quiz in the terminal.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use space_quiz::bank::resolve_bank;
use space_quiz::report::{BankReport, format_bank_report, format_summary};
use space_quiz::tui::run::run;
use space_quiz::types::{DEFAULT_REVEAL_DELAY, DEFAULT_ROUND_SIZE, OutputFormat, RoundConfig};

const DEFAULT_REVEAL_MS: u64 = DEFAULT_REVEAL_DELAY.as_millis() as u64;

#[derive(Parser)]
#[command(name = "space-quiz")]
#[command(about = "Multiple-choice space quiz in your terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a round (default)
    Play(PlayArgs),

    /// Validate a question bank and report its shape
    Check {
        /// Bank file (default: per-user override, else bundled questions)
        path: Option<PathBuf>,

        /// Questions per round
        #[arg(long, default_value_t = DEFAULT_ROUND_SIZE)]
        round_size: usize,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(clap::Args)]
struct PlayArgs {
    /// Question bank JSON file
    #[arg(long)]
    bank: Option<PathBuf>,

    /// Questions per round
    #[arg(long, default_value_t = DEFAULT_ROUND_SIZE)]
    round_size: usize,

    /// Reveal window after each answer, in milliseconds
    #[arg(long, default_value_t = DEFAULT_REVEAL_MS)]
    reveal_ms: u64,

    /// Fixed RNG seed for a reproducible round
    #[arg(long)]
    seed: Option<u64>,

    /// Format of the summary printed after quitting
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Write logs to this file (the terminal is taken by the quiz)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Default for PlayArgs {
    fn default() -> Self {
        PlayArgs {
            bank: None,
            round_size: DEFAULT_ROUND_SIZE,
            reveal_ms: DEFAULT_REVEAL_MS,
            seed: None,
            format: OutputFormatArg::Human,
            log_file: None,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or_else(|| Commands::Play(PlayArgs::default())) {
        Commands::Play(args) => cmd_play(args),
        Commands::Check { path, round_size, format } => cmd_check(path, round_size, format.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to a file. Without one, logging stays off so the TUI owns the screen.
fn init_file_logging(path: Option<&PathBuf>) -> Result<(), String> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path).map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_play(args: PlayArgs) -> Result<(), String> {
    init_file_logging(args.log_file.as_ref())?;

    let (bank, source) = resolve_bank(args.bank).map_err(|e| e.to_string())?;
    if bank.is_empty() {
        return Err(format!("{} contains no questions", source));
    }

    let config = RoundConfig {
        round_size: args.round_size,
        reveal_delay: Duration::from_millis(args.reveal_ms),
        seed: args.seed,
    };
    if config.round_size == 0 {
        return Err("--round-size must be at least 1".to_string());
    }
    tracing::info!(%source, questions = bank.len(), round_size = config.round_size, "starting quiz");

    let summary = run(bank, &config).map_err(|e| e.to_string())?;

    if let Some(summary) = summary {
        print!("{}", format_summary(&summary, args.format.into()));
    }

    Ok(())
}

fn cmd_check(path: Option<PathBuf>, round_size: usize, format: OutputFormat) -> Result<(), String> {
    init_stderr_logging();

    let (bank, source) = resolve_bank(path).map_err(|e| e.to_string())?;
    let config = RoundConfig {
        round_size,
        ..Default::default()
    };

    let report = BankReport::new(&bank, &source, &config);
    print!("{}", format_bank_report(&report, format));

    if bank.is_empty() {
        return Err(format!("{} contains no questions", source));
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
