//! User settings.
//!
//! Settings are a JSON file holding global options and per-provider
//! overrides. [`Settings::client_config`] merges the overrides onto each
//! provider's defaults to produce the configuration a client is built with.

use gielinor_core::ProviderKind;
use gielinor_fetch::{Cache, ClientConfig, MemoryCache, ttl_from_millis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

/// Environment variable overriding the global user agent.
pub const USER_AGENT_ENV: &str = "GIELINOR_USER_AGENT";

// ============================================================================
// Settings Types
// ============================================================================

/// Persisted settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// User agent sent to every provider unless overridden per provider.
    pub user_agent: Option<String>,

    /// Whether clients share an in-memory cache.
    pub cache_enabled: bool,

    /// Bound on the shared cache; unbounded when absent.
    pub cache_max_entries: Option<usize>,

    /// Default log level.
    pub log_level: LogLevel,

    /// Per-provider overrides.
    pub providers: BTreeMap<ProviderKind, ProviderSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: None,
            cache_enabled: true,
            cache_max_entries: None,
            log_level: LogLevel::default(),
            providers: BTreeMap::new(),
        }
    }
}

/// Per-provider overrides. Absent fields keep the provider default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base URL.
    pub base_url: Option<String>,

    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,

    /// Cache TTL in milliseconds. Zero or negative disables caching of this
    /// provider's results.
    pub cache_ttl_ms: Option<f64>,

    /// User agent for this provider only.
    pub user_agent: Option<String>,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Loading and Saving
// ============================================================================

impl Settings {
    /// Loads settings from the default path.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(&default_settings_path()).await
    }

    /// Loads settings from `path`.
    ///
    /// A missing or unreadable file yields the defaults. The environment
    /// override is applied and the result validated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the loaded settings are invalid.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        debug!(path = %path.display(), "Loading settings");
        let settings: Self = load_json_or_default(path).await;
        let settings = settings.with_user_agent_override(std::env::var(USER_AGENT_ENV).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Saves settings to `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the settings are invalid or cannot be written.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        self.validate()?;
        save_json(path, self).await?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Replaces the global user agent when `agent` is a non-empty value.
    #[must_use]
    pub fn with_user_agent_override(mut self, agent: Option<String>) -> Self {
        if let Some(agent) = agent.filter(|a| !a.trim().is_empty()) {
            debug!("User agent overridden from environment");
            self.user_agent = Some(agent);
        }
        self
    }

    /// Checks values the clients cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.cache_max_entries == Some(0) {
            return Err(StoreError::Config("cache_max_entries must be at least 1".into()));
        }
        for (kind, provider) in &self.providers {
            if provider.base_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
                return Err(StoreError::Config(format!("{kind}: base_url must not be empty")));
            }
            if provider.timeout_ms == Some(0) {
                return Err(StoreError::Config(format!("{kind}: timeout_ms must be positive")));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Client Configuration
    // ========================================================================

    /// Returns the overrides for `kind`, if any.
    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderSettings> {
        self.providers.get(&kind)
    }

    /// Builds the shared cache, if caching is enabled.
    pub fn build_cache(&self) -> Option<Arc<MemoryCache>> {
        if !self.cache_enabled {
            return None;
        }
        let cache = match self.cache_max_entries {
            Some(max) => MemoryCache::with_max_entries(max),
            None => MemoryCache::new(),
        };
        Some(Arc::new(cache))
    }

    /// Returns the client configuration for `kind`: provider defaults with
    /// the global and per-provider overrides applied.
    pub fn client_config(&self, kind: ProviderKind, cache: Option<Arc<dyn Cache>>) -> ClientConfig {
        let mut config = ClientConfig::for_provider(kind);
        config.cache = cache;

        let overrides = self.provider(kind);
        let user_agent = overrides
            .and_then(|p| p.user_agent.clone())
            .or_else(|| self.user_agent.clone());
        if let Some(agent) = user_agent {
            config = config.with_user_agent(agent);
        }

        let Some(overrides) = overrides else {
            return config;
        };
        if let Some(base_url) = &overrides.base_url {
            config = config.with_base_url(base_url.trim_end_matches('/'));
        }
        if let Some(ms) = overrides.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = overrides.cache_ttl_ms {
            config = config.with_cache_ttl(ttl_from_millis(ms));
        }
        config
    }
}

// ============================================================================
// Tests
// ============================================================================
