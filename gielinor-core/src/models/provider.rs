//! Provider-related types.
//!
//! This module contains [`ProviderKind`], the enum of supported upstream
//! APIs, together with the defaults each client starts from (base URL,
//! request timeout and cache TTL).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CoreError;

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported upstream data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// collectionlog.net
    CollectionLog,
    /// osrsbox static item/monster database
    Osrsbox,
    /// TempleOSRS
    Temple,
    /// Wise Old Man
    WiseOldMan,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CollectionLog => "Collection Log",
            Self::Osrsbox => "OSRSBox",
            Self::Temple => "TempleOSRS",
            Self::WiseOldMan => "Wise Old Man",
        }
    }

    /// Returns all available provider kinds.
    pub fn all() -> &'static [ProviderKind] {
        &[
            Self::CollectionLog,
            Self::Osrsbox,
            Self::Temple,
            Self::WiseOldMan,
        ]
    }

    /// Returns the CLI name for this provider.
    ///
    /// This is also the namespace used as the first part of every cache key
    /// written by the provider's client.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::CollectionLog => "collectionlog",
            Self::Osrsbox => "osrsbox",
            Self::Temple => "temple",
            Self::WiseOldMan => "wise-old-man",
        }
    }

    /// Returns the production base URL of the upstream API.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::CollectionLog => "https://api.collectionlog.net",
            Self::Osrsbox => "https://www.osrsbox.com/osrsbox-db",
            Self::Temple => "https://templeosrs.com/api",
            Self::WiseOldMan => "https://api.wiseoldman.net/v2",
        }
    }

    /// Returns the default per-request timeout.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::CollectionLog | Self::Osrsbox => Duration::from_secs(10),
            Self::Temple | Self::WiseOldMan => Duration::from_secs(15),
        }
    }

    /// Returns how long successful responses are cached by default.
    pub fn default_cache_ttl(&self) -> Duration {
        match self {
            Self::CollectionLog => Duration::from_secs(10 * 60),
            Self::Osrsbox => Duration::from_secs(24 * 60 * 60),
            Self::Temple | Self::WiseOldMan => Duration::from_secs(5 * 60),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for ProviderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collectionlog" | "collection-log" | "clog" => Ok(Self::CollectionLog),
            "osrsbox" => Ok(Self::Osrsbox),
            "temple" | "templeosrs" => Ok(Self::Temple),
            "wise-old-man" | "wiseoldman" | "wom" => Ok(Self::WiseOldMan),
            other => Err(CoreError::ProviderNotFound(other.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
