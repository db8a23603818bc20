//! collectionlog.net API client.

use gielinor_core::{ApiError, ProviderKind};
use gielinor_fetch::{ApiCall, ApiClient, CancellationToken, ClientConfig, ProviderHooks};
use serde::Deserialize;
use tracing::instrument;

use super::models::CollectionLogResponse;
use crate::player;

const PROVIDER: ProviderKind = ProviderKind::CollectionLog;

// ============================================================================
// Error Envelope
// ============================================================================

/// Error body returned by collectionlog.net on failure.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    envelope
        .error
        .into_iter()
        .chain(envelope.message)
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
}

// ============================================================================
// API Client
// ============================================================================

/// collectionlog.net API client.
#[derive(Debug, Clone)]
pub struct CollectionLogClient {
    api: ApiClient,
}

impl CollectionLogClient {
    /// Creates a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Self {
        let hooks = ProviderHooks {
            error_message,
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

    /// Fetches a player's collection log.
    #[instrument(skip(self))]
    pub async fn get_user_collection_log(
        &self,
        username: &str,
    ) -> Result<CollectionLogResponse, ApiError> {
        let name = player::username(PROVIDER, username)?;
        let url = self.api.url(&["user", name])?;
        let key_name = player::cache_name(name);
        let key = self.api.cache_key("user", [Some(key_name.as_str())]);

        self.api.execute(ApiCall::get("user", url, key)).await
    }
}

impl Default for CollectionLogClient {
    fn default() -> Self {
        Self::new(ClientConfig::for_provider(PROVIDER))
    }
}

// ============================================================================
// Tests
// ============================================================================
