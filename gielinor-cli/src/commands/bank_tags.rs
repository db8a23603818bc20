//! Bank-tags command - parse a RuneLite bank-tag export.

use anyhow::{Context, Result};
use clap::Args;
use gielinor_providers::parse_bank_tag_export;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use super::emit;
use crate::Cli;

/// Arguments for the bank-tags command.
#[derive(Args)]
pub struct BankTagsArgs {
    /// Export file, or `-` for standard input.
    pub input: PathBuf,
}

async fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("reading standard input")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("reading {}", input.display()))
}

/// Runs the bank-tags command.
pub async fn run(args: &BankTagsArgs, cli: &Cli) -> Result<()> {
    let text = read_input(&args.input).await?;
    let import = parse_bank_tag_export(&text);

    info!(
        tags = import.tags.len(),
        layouts = import.layouts.len(),
        errors = import.errors.len(),
        "Parsed bank tag export"
    );
    if !import.is_clean() {
        warn!(errors = import.errors.len(), "Some lines were rejected");
    }

    emit(cli, &import, |f, import| f.format_bank_tags(import))
}
