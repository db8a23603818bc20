//! CLI command implementations.

pub mod bank_tags;
pub mod collection_log;
pub mod config;
pub mod osrsbox;
pub mod providers;
pub mod temple;
pub mod wom;

use anyhow::{Context, Result};
use gielinor_fetch::{Cache, CancellationToken};
use gielinor_providers::GielinorClients;
use gielinor_store::{Settings, default_settings_path};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Returns the settings file the CLI reads and writes.
pub fn settings_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(default_settings_path)
}

/// Loads settings from `--config` or the default path.
pub async fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = settings_path(cli);
    Settings::load(&path)
        .await
        .with_context(|| format!("loading settings from {}", path.display()))
}

/// Builds every client from the settings.
///
/// The clients share one cache unless `--no-cache` is given or caching is
/// disabled in the settings. Ctrl-C cancels in-flight requests.
pub fn build_clients(cli: &Cli, settings: &Settings) -> GielinorClients {
    let cache: Option<Arc<dyn Cache>> = if cli.no_cache {
        None
    } else {
        settings.build_cache().map(|cache| cache as Arc<dyn Cache>)
    };
    debug!(cache = cache.is_some(), "Building clients");

    let clients = GielinorClients::new(|kind| settings.client_config(kind, cache.clone()));
    clients.with_cancellation(&cancel_on_ctrl_c())
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupted, cancelling requests");
            trigger.cancel();
        }
    });
    token
}

/// Prints `value` as JSON, or as text rendered by `text`.
pub fn emit<T, F>(cli: &Cli, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&TextFormatter, &T) -> String,
{
    let output = match cli.format {
        OutputFormat::Text => text(&TextFormatter::new(!cli.no_color), value),
        OutputFormat::Json => JsonFormatter::new(cli.pretty).format(value)?,
    };
    println!("{output}");
    Ok(())
}
