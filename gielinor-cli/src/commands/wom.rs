//! Wom command - query Wise Old Man.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use gielinor_providers::{Period, SnapshotQuery};
use gielinor_store::Settings;
use tracing::info;

use super::{build_clients, emit};
use crate::Cli;

/// Arguments for the wom command.
#[derive(Args)]
pub struct WomArgs {
    #[command(subcommand)]
    pub action: WomAction,
}

/// Wise Old Man subcommands.
#[derive(Subcommand)]
pub enum WomAction {
    /// Player details.
    Player {
        /// Player name.
        username: String,
    },

    /// Refresh a player from the hiscores.
    Update {
        /// Player name.
        username: String,
    },

    /// Snapshot history.
    Snapshots {
        /// Player name.
        username: String,
        /// Period: five_min, day, week, month or year.
        #[arg(long, conflicts_with_all = ["start", "end"])]
        period: Option<Period>,
        /// Range start (RFC 3339).
        #[arg(long, requires = "end")]
        start: Option<DateTime<Utc>>,
        /// Range end (RFC 3339).
        #[arg(long, requires = "start")]
        end: Option<DateTime<Utc>>,
    },
}

/// Builds the snapshot query from the command-line filters.
pub fn snapshot_query(
    period: Option<Period>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<SnapshotQuery> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            bail!("--start must not be after --end");
        }
    }
    Ok(SnapshotQuery {
        period,
        start_date: start,
        end_date: end,
    })
}

/// Runs the wom command.
pub async fn run(args: &WomArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let wom = build_clients(cli, settings).wise_old_man;

    match &args.action {
        WomAction::Player { username } => {
            info!(%username, "Fetching WOM player");
            let player = wom
                .get_player(username)
                .await
                .with_context(|| format!("fetching player {username}"))?;
            emit(cli, &player, |f, p| f.format_player(p))
        }
        WomAction::Update { username } => {
            info!(%username, "Updating WOM player");
            let player = wom
                .update_player(username)
                .await
                .with_context(|| format!("updating player {username}"))?;
            emit(cli, &player, |f, p| f.format_player(p))
        }
        WomAction::Snapshots {
            username,
            period,
            start,
            end,
        } => {
            info!(%username, "Fetching WOM snapshots");
            let query = snapshot_query(*period, *start, *end)?;
            let snapshots = wom
                .get_player_snapshots(username, &query)
                .await
                .with_context(|| format!("fetching snapshots for {username}"))?;
            emit(cli, &snapshots, |f, s| f.format_snapshots(s))
        }
    }
}
