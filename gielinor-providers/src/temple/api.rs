//! TempleOSRS API client.

use gielinor_core::{ApiError, ProviderKind};
use gielinor_fetch::{ApiCall, ApiClient, CancellationToken, ClientConfig, ProviderHooks};
use std::fmt;
use tracing::instrument;

use super::envelope::{error_message, unwrap_envelope};
use super::models::TempleData;
use crate::player;

const PROVIDER: ProviderKind = ProviderKind::Temple;

// ============================================================================
// Endpoints
// ============================================================================

/// Temple player endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempleEndpoint {
    /// `player_info.php`
    PlayerInfo,
    /// `player_stats.php`
    PlayerStats,
    /// `player_gains.php`
    PlayerGains,
    /// `player_datapoints.php`
    PlayerDatapoints,
}

impl TempleEndpoint {
    /// Returns the endpoint name, also used as the cache operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayerInfo => "player_info",
            Self::PlayerStats => "player_stats",
            Self::PlayerGains => "player_gains",
            Self::PlayerDatapoints => "player_datapoints",
        }
    }

    /// Returns the script path relative to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::PlayerInfo => "player_info.php",
            Self::PlayerStats => "player_stats.php",
            Self::PlayerGains => "player_gains.php",
            Self::PlayerDatapoints => "player_datapoints.php",
        }
    }
}

impl fmt::Display for TempleEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// API Client
// ============================================================================

/// TempleOSRS API client.
#[derive(Debug, Clone)]
pub struct TempleClient {
    api: ApiClient,
}

impl TempleClient {
    /// Creates a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Self {
        let hooks = ProviderHooks {
            error_message,
            unwrap_payload: unwrap_envelope,
        };
        Self {
            api: ApiClient::new(PROVIDER, config, hooks),
        }
    }

    /// Returns a clone whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            api: self.api.with_cancellation(token),
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    /// Calls a player endpoint with at most one extra query parameter.
    async fn player_call(
        &self,
        endpoint: TempleEndpoint,
        username: &str,
        extra: Option<(&str, &str)>,
    ) -> Result<TempleData, ApiError> {
        let name = player::username(PROVIDER, username)?;
        let url = self.api.url(&[endpoint.path()])?;

        let key_name = player::cache_name(name);
        let key = self.api.cache_key(
            endpoint.name(),
            [Some(key_name.as_str()), extra.map(|(_, value)| value)],
        );

        let mut call = ApiCall::get(endpoint.name(), url, key).query("player", Some(name));
        if let Some((param, value)) = extra {
            call = call.query(param, Some(value));
        }

        self.api.execute(call).await
    }

    /// Fetches `player_info.php`.
    #[instrument(skip(self))]
    pub async fn get_player_info(&self, username: &str) -> Result<TempleData, ApiError> {
        self.player_call(TempleEndpoint::PlayerInfo, username, None).await
    }

    /// Fetches `player_stats.php`.
    #[instrument(skip(self))]
    pub async fn get_player_stats(&self, username: &str) -> Result<TempleData, ApiError> {
        self.player_call(TempleEndpoint::PlayerStats, username, None).await
    }

    /// Fetches `player_gains.php`, optionally for a period such as `week`.
    #[instrument(skip(self))]
    pub async fn get_player_gains(
        &self,
        username: &str,
        period: Option<&str>,
    ) -> Result<TempleData, ApiError> {
        let extra = period.map(|p| ("period", p));
        self.player_call(TempleEndpoint::PlayerGains, username, extra).await
    }

    /// Fetches `player_datapoints.php`, optionally for an interval.
    #[instrument(skip(self))]
    pub async fn get_player_datapoints(
        &self,
        username: &str,
        interval: Option<&str>,
    ) -> Result<TempleData, ApiError> {
        let extra = interval.map(|i| ("interval", i));
        self.player_call(TempleEndpoint::PlayerDatapoints, username, extra).await
    }
}

impl Default for TempleClient {
    fn default() -> Self {
        Self::new(ClientConfig::for_provider(PROVIDER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(TempleEndpoint::PlayerInfo.path(), "player_info.php");
        assert_eq!(TempleEndpoint::PlayerDatapoints.to_string(), "player_datapoints");
    }

    #[test]
    fn test_default_config() {
        let client = TempleClient::default();
        assert_eq!(client.config().base_url, "https://templeosrs.com/api");
        assert_eq!(client.config().timeout.as_secs(), 15);
    }
}
