//! Collection-log command - fetch a player's collection log.

use anyhow::{Context, Result};
use clap::Args;
use gielinor_store::Settings;
use tracing::info;

use super::{build_clients, emit};
use crate::Cli;

/// Arguments for the collection-log command.
#[derive(Args)]
pub struct CollectionLogArgs {
    /// Player name.
    pub username: String,

    /// Also list every obtained item.
    #[arg(long)]
    pub items: bool,
}

/// Runs the collection-log command.
pub async fn run(args: &CollectionLogArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    info!(username = %args.username, "Fetching collection log");

    let clients = build_clients(cli, settings);
    let response = clients
        .collection_log
        .get_user_collection_log(&args.username)
        .await
        .with_context(|| format!("fetching collection log for {}", args.username))?;

    emit(cli, &response, |f, r| {
        f.format_collection_log(&r.collection_log, args.items)
    })
}
