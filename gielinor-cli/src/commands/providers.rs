//! Providers command - list providers and their effective settings.

use anyhow::{Context, Result};
use clap::Args;
use gielinor_providers::{ProviderDescriptor, ProviderRegistry};
use gielinor_store::Settings;
use serde::Serialize;
use tracing::info;

use super::emit;
use crate::Cli;

/// Arguments for the providers command.
#[derive(Args)]
pub struct ProvidersArgs {
    /// Show only this provider (CLI name or alias, e.g. `wom`).
    pub provider: Option<String>,

    /// Show the method and route of one operation of the provider.
    #[arg(long, requires = "provider")]
    pub operation: Option<String>,
}

/// One provider as printed by `gielinor providers`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRow {
    pub name: &'static str,
    pub cli_name: &'static str,
    pub homepage: &'static str,
    pub base_url: String,
    pub timeout_ms: u128,
    pub cache_ttl_ms: u128,
    pub operations: Vec<&'static str>,
}

fn row(desc: &ProviderDescriptor, settings: &Settings) -> ProviderRow {
    let config = settings.client_config(desc.id, None);
    ProviderRow {
        name: desc.display_name(),
        cli_name: desc.cli_name(),
        homepage: desc.homepage,
        base_url: config.base_url,
        timeout_ms: config.timeout.as_millis(),
        cache_ttl_ms: config.cache_ttl.as_millis(),
        operations: desc.operations.iter().map(|op| op.name).collect(),
    }
}

/// Builds the provider rows from the settings.
pub fn rows(settings: &Settings) -> Vec<ProviderRow> {
    ProviderRegistry::all()
        .iter()
        .map(|desc| row(desc, settings))
        .collect()
}

/// Resolves a provider by CLI name or alias.
pub fn lookup(name: &str) -> Result<&'static ProviderDescriptor> {
    ProviderRegistry::get_by_cli_name(name).with_context(|| {
        let known: Vec<_> = ProviderRegistry::all().iter().map(|d| d.cli_name()).collect();
        format!("unknown provider '{name}' (expected one of {})", known.join(", "))
    })
}

/// Runs the providers command.
pub fn run(args: &ProvidersArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let Some(name) = &args.provider else {
        info!("Listing providers");
        return emit(cli, &rows(settings), |f, rows| f.format_providers(rows));
    };

    let desc = lookup(name)?;
    info!(provider = %desc.id, "Showing provider");

    if let Some(operation) = &args.operation {
        let op = desc.operation(operation).with_context(|| {
            format!("{} has no operation '{operation}'", desc.cli_name())
        })?;
        return emit(cli, op, |f, op| f.format_operation(desc, op));
    }

    emit(cli, &vec![row(desc, settings)], |f, rows| f.format_providers(rows))
}
