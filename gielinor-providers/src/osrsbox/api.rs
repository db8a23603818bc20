//! osrsbox-db API client.

use gielinor_core::{ApiError, ProviderKind};
use gielinor_fetch::{
    ApiCall, ApiClient, CancellationToken, ClientConfig, ProviderHooks, standard_error_message,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::models::{OsrsboxItem, OsrsboxMonster};

const PROVIDER: ProviderKind = ProviderKind::Osrsbox;

/// Directory holding one JSON file per item.
const ITEMS_DIR: &str = "items-json";

/// Directory holding one JSON file per monster.
const MONSTERS_DIR: &str = "monsters-json";

// ============================================================================
// API Client
// ============================================================================

/// osrsbox-db API client.
#[derive(Debug, Clone)]
pub struct OsrsboxClient {
    api: ApiClient,
}

impl OsrsboxClient {
    /// Creates a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Self {
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

    async fn get_record<T>(&self, operation: &'static str, dir: &str, id: u32) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Serialize,
    {
        let id = id.to_string();
        let file = format!("{id}.json");
        let url = self.api.url(&[dir, file.as_str()])?;
        let key = self.api.cache_key(operation, [Some(id.as_str())]);

        self.api.execute(ApiCall::get(operation, url, key)).await
    }

    /// Fetches one item record.
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: u32) -> Result<OsrsboxItem, ApiError> {
        self.get_record("item", ITEMS_DIR, id).await
    }

    /// Fetches one monster record.
    #[instrument(skip(self))]
    pub async fn get_monster(&self, id: u32) -> Result<OsrsboxMonster, ApiError> {
        self.get_record("monster", MONSTERS_DIR, id).await
    }

    /// Fetches item records one after another.
    ///
    /// The first failure aborts the batch and is returned as-is.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_items(&self, ids: &[u32]) -> Result<Vec<OsrsboxItem>, ApiError> {
        let mut items = Vec::with_capacity(ids.len());
        for &id in ids {
            items.push(self.get_item(id).await?);
        }
        debug!(count = items.len(), "Fetched item batch");
        Ok(items)
    }

    /// Fetches monster records one after another.
    ///
    /// The first failure aborts the batch and is returned as-is.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_monsters(&self, ids: &[u32]) -> Result<Vec<OsrsboxMonster>, ApiError> {
        let mut monsters = Vec::with_capacity(ids.len());
        for &id in ids {
            monsters.push(self.get_monster(id).await?);
        }
        debug!(count = monsters.len(), "Fetched monster batch");
        Ok(monsters)
    }
}

impl Default for OsrsboxClient {
    fn default() -> Self {
        Self::new(ClientConfig::for_provider(PROVIDER))
    }
}
