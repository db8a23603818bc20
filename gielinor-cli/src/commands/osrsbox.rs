//! Item and monster commands - fetch osrsbox-db records.

use anyhow::{Context, Result};
use clap::Args;
use gielinor_store::Settings;
use tracing::info;

use super::{build_clients, emit};
use crate::Cli;

/// Arguments for the item and monster commands.
#[derive(Args)]
pub struct IdsArgs {
    /// One or more IDs, fetched in order.
    #[arg(required = true)]
    pub ids: Vec<u32>,
}

/// Runs the item command.
pub async fn run_items(args: &IdsArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    info!(count = args.ids.len(), "Fetching items");

    let clients = build_clients(cli, settings);
    let items = clients
        .osrsbox
        .get_items(&args.ids)
        .await
        .context("fetching items")?;

    emit(cli, &items, |f, items| f.format_items(items))
}

/// Runs the monster command.
pub async fn run_monsters(args: &IdsArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    info!(count = args.ids.len(), "Fetching monsters");

    let clients = build_clients(cli, settings);
    let monsters = clients
        .osrsbox
        .get_monsters(&args.ids)
        .await
        .context("fetching monsters")?;

    emit(cli, &monsters, |f, monsters| f.format_monsters(monsters))
}
