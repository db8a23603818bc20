// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Gielinor CLI - Old School RuneScape data APIs from the command line.
//!
//! # Examples
//!
//! ```bash
//! # List providers and their effective settings
//! gielinor providers
//!
//! # Route of one Wise Old Man operation
//! gielinor providers wom --operation update_player
//!
//! # Collection log summary
//! gielinor collection-log Zezima
//!
//! # Item and monster records
//! gielinor item 4151 11840
//! gielinor monster 415
//!
//! # TempleOSRS gains for the last week
//! gielinor temple gains Zezima --period week
//!
//! # Wise Old Man snapshots as JSON
//! gielinor --format json --pretty wom snapshots Zezima --period month
//!
//! # Parse a RuneLite bank-tag export
//! gielinor bank-tags export.txt
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gielinor_core::{ApiError, ErrorKind};
use gielinor_store::LogLevel;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{bank_tags, collection_log, config, osrsbox, providers, temple, wom};

// ============================================================================
// CLI Definition
// ============================================================================

/// Gielinor CLI - Old School RuneScape data APIs.
#[derive(Parser)]
#[command(name = "gielinor")]
#[command(about = "Old School RuneScape data API client")]
#[command(long_about = r#"
Gielinor queries Old School RuneScape community APIs with retry,
typed errors and an in-memory cache.

Supported providers:
  • collectionlog.net (collectionlog)
  • osrsbox-db (osrsbox)
  • TempleOSRS (temple)
  • Wise Old Man (wise-old-man)

Examples:
  gielinor collection-log Zezima        # Collection log summary
  gielinor item 4151                    # Item record
  gielinor temple stats Zezima          # TempleOSRS stats
  gielinor wom update Zezima            # Refresh a WOM player
  gielinor bank-tags export.txt         # Parse a bank-tag export
"#)]
#[command(version)]
#[command(author = "Gielinor Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file (defaults to the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not cache responses.
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List providers with their effective settings.
    #[command(visible_alias = "p")]
    Providers(providers::ProvidersArgs),

    /// Fetch a player's collection log from collectionlog.net.
    #[command(visible_alias = "clog")]
    CollectionLog(collection_log::CollectionLogArgs),

    /// Fetch item records from osrsbox-db.
    Item(osrsbox::IdsArgs),

    /// Fetch monster records from osrsbox-db.
    Monster(osrsbox::IdsArgs),

    /// Query TempleOSRS.
    Temple(temple::TempleArgs),

    /// Query Wise Old Man.
    Wom(wom::WomArgs),

    /// Parse a RuneLite bank-tag export.
    BankTags(bank_tags::BankTagsArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Player, item or monster not found.
    NotFound = 2,
    /// Upstream payload did not validate.
    ParseError = 3,
    /// Timeout.
    Timeout = 4,
}

impl ExitCode {
    /// Maps a command error to its exit code.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<ApiError>().map(ApiError::kind) {
            Some(ErrorKind::NotFound) => Self::NotFound,
            Some(ErrorKind::ParseError) => Self::ParseError,
            Some(ErrorKind::Timeout) => Self::Timeout,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("gielinor=debug,info")
    } else {
        EnvFilter::new(format!("gielinor={level}"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = commands::load_settings(&cli).await?;
    setup_logging(cli.verbose, cli.quiet, settings.log_level);

    let result = match &cli.command {
        Commands::Providers(args) => providers::run(args, &cli, &settings),
        Commands::CollectionLog(args) => collection_log::run(args, &cli, &settings).await,
        Commands::Item(args) => osrsbox::run_items(args, &cli, &settings).await,
        Commands::Monster(args) => osrsbox::run_monsters(args, &cli, &settings).await,
        Commands::Temple(args) => temple::run(args, &cli, &settings).await,
        Commands::Wom(args) => wom::run(args, &cli, &settings).await,
        Commands::BankTags(args) => bank_tags::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli, &settings).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
