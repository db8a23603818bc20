//! Config command - manage configuration.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use gielinor_store::Settings;
use tracing::info;

use super::{emit, settings_path};
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective settings.
    Show,

    /// Show the settings file path.
    Path,

    /// Write a default settings file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    match &args.action {
        ConfigAction::Show => emit(cli, settings, |f, s| f.format_settings(s)),
        ConfigAction::Path => show_path(cli),
        ConfigAction::Init { force } => init(cli, *force).await,
    }
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = settings_path(cli);

    match cli.format {
        OutputFormat::Text => {
            println!("Settings file: {}", path.display());
            println!("Exists:        {}", path.exists());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "settings_file": path.display().to_string(),
                "exists": path.exists(),
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }

    Ok(())
}

async fn init(cli: &Cli, force: bool) -> Result<()> {
    let path = settings_path(cli);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    Settings::default().save(&path).await?;
    info!(path = %path.display(), "Settings initialised");
    if !cli.quiet {
        println!("Wrote default settings to {}", path.display());
    }

    Ok(())
}
