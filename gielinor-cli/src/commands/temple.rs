//! Temple command - query TempleOSRS player endpoints.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use gielinor_providers::TempleEndpoint;
use gielinor_store::Settings;
use tracing::info;

use super::{build_clients, emit};
use crate::Cli;

/// Arguments for the temple command.
#[derive(Args)]
pub struct TempleArgs {
    #[command(subcommand)]
    pub action: TempleAction,
}

/// Temple subcommands.
#[derive(Subcommand)]
pub enum TempleAction {
    /// Player info (`player_info.php`).
    Info {
        /// Player name.
        username: String,
    },

    /// Current stats (`player_stats.php`).
    Stats {
        /// Player name.
        username: String,
    },

    /// Gains over a period (`player_gains.php`).
    Gains {
        /// Player name.
        username: String,
        /// Period such as `day`, `week`, `month` or `year`.
        #[arg(long)]
        period: Option<String>,
    },

    /// Historical datapoints (`player_datapoints.php`).
    Datapoints {
        /// Player name.
        username: String,
        /// Interval such as `7d` or `31d`.
        #[arg(long)]
        interval: Option<String>,
    },
}

impl TempleAction {
    fn endpoint(&self) -> TempleEndpoint {
        match self {
            Self::Info { .. } => TempleEndpoint::PlayerInfo,
            Self::Stats { .. } => TempleEndpoint::PlayerStats,
            Self::Gains { .. } => TempleEndpoint::PlayerGains,
            Self::Datapoints { .. } => TempleEndpoint::PlayerDatapoints,
        }
    }

    fn username(&self) -> &str {
        match self {
            Self::Info { username }
            | Self::Stats { username }
            | Self::Gains { username, .. }
            | Self::Datapoints { username, .. } => username,
        }
    }
}

/// Runs the temple command.
pub async fn run(args: &TempleArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let action = &args.action;
    let endpoint = action.endpoint();
    info!(%endpoint, username = %action.username(), "Querying TempleOSRS");

    let temple = build_clients(cli, settings).temple;
    let data = match action {
        TempleAction::Info { username } => temple.get_player_info(username).await,
        TempleAction::Stats { username } => temple.get_player_stats(username).await,
        TempleAction::Gains { username, period } => {
            temple.get_player_gains(username, period.as_deref()).await
        }
        TempleAction::Datapoints { username, interval } => {
            temple.get_player_datapoints(username, interval.as_deref()).await
        }
    }
    .with_context(|| format!("fetching {endpoint} for {}", action.username()))?;

    emit(cli, &data, |f, data| f.format_temple(endpoint, data))
}
