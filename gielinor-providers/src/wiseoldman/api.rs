//! Wise Old Man v2 API client.

use gielinor_core::{ApiError, ProviderKind};
use gielinor_fetch::{
    ApiCall, ApiClient, CacheMode, CancellationToken, ClientConfig, Method, ProviderHooks,
    standard_error_message,
};
use tracing::{debug, instrument};

use super::models::{Player, Snapshot, SnapshotQuery};
use crate::player;

const PROVIDER: ProviderKind = ProviderKind::WiseOldMan;

/// Cache operation shared by `get_player` and `update_player`.
const PLAYER_OP: &str = "player";

const SNAPSHOTS_OP: &str = "snapshots";

// ============================================================================
// API Client
// ============================================================================

/// Wise Old Man API client.
#[derive(Debug, Clone)]
pub struct WiseOldManClient {
    api: ApiClient,
}

impl WiseOldManClient {
    /// Creates a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Self {
        // WOM errors are `{"message": "..."}`.
        let hooks = ProviderHooks {
            error_message: standard_error_message,
            ..ProviderHooks::default()
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

    fn player_call(&self, username: &str) -> Result<ApiCall, ApiError> {
        let name = player::username(PROVIDER, username)?;
        let url = self.api.url(&["players", name])?;
        let key_name = player::cache_name(name);
        let key = self.api.cache_key(PLAYER_OP, [Some(key_name.as_str())]);
        Ok(ApiCall::get(PLAYER_OP, url, key))
    }

    /// Fetches a tracked player's details.
    #[instrument(skip(self))]
    pub async fn get_player(&self, username: &str) -> Result<Player, ApiError> {
        let call = self.player_call(username)?;
        self.api.execute(call).await
    }

    /// Asks WOM to refresh a player from the hiscores.
    ///
    /// Never served from cache. On success the returned record replaces the
    /// cached `get_player` value.
    #[instrument(skip(self))]
    pub async fn update_player(&self, username: &str) -> Result<Player, ApiError> {
        let call = self
            .player_call(username)?
            .method(Method::POST)
            .cache_mode(CacheMode::WriteOnly);
        let player: Player = self.api.execute(call).await?;
        debug!(player_id = player.id, "Player updated");
        Ok(player)
    }

    /// Fetches a player's snapshots for a period or date range.
    #[instrument(skip(self))]
    pub async fn get_player_snapshots(
        &self,
        username: &str,
        query: &SnapshotQuery,
    ) -> Result<Vec<Snapshot>, ApiError> {
        let name = player::username(PROVIDER, username)?;
        let url = self.api.url(&["players", name, "snapshots"])?;

        let key_name = player::cache_name(name);
        let [period_part, start_part, end_part] = query.cache_parts();
        let key = self.api.cache_key(
            SNAPSHOTS_OP,
            [
                Some(key_name.as_str()),
                period_part.as_deref(),
                start_part.as_deref(),
                end_part.as_deref(),
            ],
        );

        let call = ApiCall::get(SNAPSHOTS_OP, url, key)
            .query("period", query.period_param())
            .query("startDate", query.start_param())
            .query("endDate", query.end_param());

        self.api.execute(call).await
    }
}

impl Default for WiseOldManClient {
    fn default() -> Self {
        Self::new(ClientConfig::for_provider(PROVIDER))
    }
}
