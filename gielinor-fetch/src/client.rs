//! Generic validated API client.
//!
//! Every provider client is an [`ApiClient`] configured with a
//! [`ClientConfig`] and a set of [`ProviderHooks`]. A call goes through:
//!
//! 1. cache lookup (when a cache is configured and the call reads it)
//! 2. the HTTP exchange, retried by the configured [`RetryStrategy`]
//! 3. error classification into [`ApiError`]
//! 4. envelope unwrapping and serde validation of the payload
//! 5. cache write of the validated value

use gielinor_core::{ApiError, ProviderKind};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::cache::{Cache, build_cache_key};
use crate::error::HttpError;
use crate::http::{HttpClient, Request};
use crate::retry::RetryStrategy;

// ============================================================================
// Client Configuration
// ============================================================================

/// Per-provider client configuration.
///
/// Supplied entirely by the caller and never mutated by the client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the upstream API.
    pub base_url: String,
    /// Timeout applied to every attempt.
    pub timeout: Duration,
    /// Optional cache for validated responses.
    pub cache: Option<Arc<dyn Cache>>,
    /// How long cached responses stay fresh.
    pub cache_ttl: Duration,
    /// Optional `User-Agent` header.
    pub user_agent: Option<String>,
    /// Retry budget and backoff.
    pub retry: RetryStrategy,
}

impl ClientConfig {
    /// Returns the defaults for a provider: production base URL, provider
    /// timeout and TTL, no cache, no user agent, default retry strategy.
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            base_url: provider.default_base_url().to_string(),
            timeout: provider.default_timeout(),
            cache: None,
            cache_ttl: provider.default_cache_ttl(),
            user_agent: None,
            retry: RetryStrategy::default(),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables caching through the given backend.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the cache TTL.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the retry strategy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryStrategy) -> Self {
        self.retry = retry;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("cache", &self.cache.is_some())
            .field("cache_ttl", &self.cache_ttl)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .finish()
    }
}

// ============================================================================
// Provider Hooks
// ============================================================================

/// Provider-specific behaviour plugged into [`ApiClient`].
#[derive(Debug, Clone, Copy)]
pub struct ProviderHooks {
    /// Extracts a human-readable message from a non-2xx body.
    pub error_message: fn(&str) -> Option<String>,
    /// Unwraps a 2xx body before validation. `Err` carries the message of a
    /// logical failure reported inside a success response.
    pub unwrap_payload: fn(Value) -> Result<Value, String>,
}

impl Default for ProviderHooks {
    fn default() -> Self {
        Self {
            error_message: standard_error_message,
            unwrap_payload: Ok,
        }
    }
}

/// Reads a non-empty `message` or `error` string from a JSON error body.
pub fn standard_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Converts a transport error into the caller-facing taxonomy.
pub fn classify(
    provider: ProviderKind,
    error: HttpError,
    error_message: fn(&str) -> Option<String>,
) -> ApiError {
    match error {
        HttpError::Status { status: 404, body } => ApiError::NotFound {
            provider,
            message: error_message(&body).unwrap_or_else(|| "resource not found".to_string()),
        },
        HttpError::Status { status: 429, body } => ApiError::RateLimited {
            provider,
            message: error_message(&body).unwrap_or_else(|| "too many requests".to_string()),
        },
        HttpError::Status { status, body } => ApiError::Server {
            provider,
            status,
            message: error_message(&body)
                .unwrap_or_else(|| format!("request failed with status {status}")),
        },
        HttpError::Timeout(after) => ApiError::Timeout { provider, after },
        HttpError::Cancelled => ApiError::Cancelled { provider },
        HttpError::InvalidJson(e) => ApiError::parse(provider, &e),
        HttpError::InvalidUrl(message) | HttpError::InvalidHeader(message) => {
            ApiError::InvalidRequest { provider, message }
        }
        HttpError::Request(e) if e.is_builder() => ApiError::InvalidRequest {
            provider,
            message: e.to_string(),
        },
        HttpError::Request(e) => ApiError::Transport {
            provider,
            message: e.to_string(),
        },
    }
}

// ============================================================================
// API Call
// ============================================================================

/// How a call interacts with the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Serve hits, store fresh results.
    ReadWrite,
    /// Always go upstream, store the result.
    WriteOnly,
}

/// One logical operation against a provider.
#[derive(Debug, Clone)]
pub struct ApiCall {
    /// Operation name, used in logs and cache keys.
    pub operation: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: Url,
    /// Query parameters; `None` values are omitted.
    pub query: Vec<(String, Option<String>)>,
    /// Cache key, usually from [`ApiClient::cache_key`].
    pub cache_key: String,
    /// Cache behaviour.
    pub cache_mode: CacheMode,
}

impl ApiCall {
    /// Creates a cached GET call.
    pub fn get(operation: &'static str, url: Url, cache_key: String) -> Self {
        Self {
            operation,
            method: Method::GET,
            url,
            query: Vec::new(),
            cache_key,
            cache_mode: CacheMode::ReadWrite,
        }
    }

    /// Adds a query parameter. `None` values are not serialized.
    #[must_use]
    pub fn query<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        self.query.push((key.to_string(), value.map(|v| v.to_string())));
        self
    }

    /// Overrides the method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Overrides the cache mode.
    #[must_use]
    pub fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }
}

// ============================================================================
// API Client
// ============================================================================

/// Provider-parameterised client: cache, retry, classify, validate.
///
/// Cloning is cheap and clones share the HTTP pool and the cache.
#[derive(Debug, Clone)]
pub struct ApiClient {
    provider: ProviderKind,
    config: ClientConfig,
    hooks: ProviderHooks,
    http: HttpClient,
    cancel: Option<CancellationToken>,
}

impl ApiClient {
    /// Creates a client for `provider`.
    pub fn new(provider: ProviderKind, config: ClientConfig, hooks: ProviderHooks) -> Self {
        Self {
            provider,
            config,
            hooks,
            http: HttpClient::new(),
            cancel: None,
        }
    }

    /// Uses an existing HTTP client (and its connection pool).
    #[must_use]
    pub fn with_http(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    /// Returns a clone whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        let mut client = self.clone();
        client.cancel = Some(token);
        client
    }

    /// Returns the provider this client talks to.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds `{base_url}/{segments...}`, percent-encoding each segment.
    pub fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let invalid = |message: String| ApiError::InvalidRequest {
            provider: self.provider,
            message,
        };

        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| invalid(format!("{}: {e}", self.config.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| invalid(format!("{} cannot be a base URL", self.config.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds `provider:operation:parts...`, skipping absent parts.
    pub fn cache_key<'a>(
        &self,
        operation: &'a str,
        parts: impl IntoIterator<Item = Option<&'a str>>,
    ) -> String {
        let head = [Some(self.provider.cli_name()), Some(operation)];
        build_cache_key(head.into_iter().chain(parts))
    }

    /// Executes a call and validates the payload as `T`.
    #[instrument(
        skip(self, call),
        fields(provider = %self.provider, operation = call.operation, key = %call.cache_key)
    )]
    pub async fn execute<T>(&self, call: ApiCall) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Serialize,
    {
        if call.cache_mode == CacheMode::ReadWrite {
            if let Some(hit) = self.cache_lookup::<T>(&call.cache_key).await {
                return Ok(hit);
            }
        }

        let value = self
            .config
            .retry
            .run_until_cancelled(self.cancel.as_ref(), |attempt| {
                self.attempt::<T>(&call, attempt)
            })
            .await?;

        self.cache_store(&call.cache_key, &value).await;
        Ok(value)
    }

    async fn attempt<T: DeserializeOwned>(&self, call: &ApiCall, attempt: u32) -> Result<T, ApiError> {
        debug!(attempt, "Requesting");

        let mut request = Request::new(call.method.clone(), call.url.as_str())
            .timeout(self.config.timeout)
            .cancel_on(self.cancel.clone());
        request.query.clone_from(&call.query);
        if let Some(agent) = &self.config.user_agent {
            request = request.header("user-agent", agent.as_str());
        }

        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| classify(self.provider, e, self.hooks.error_message))?;

        let payload = (self.hooks.unwrap_payload)(response.body).map_err(|message| {
            ApiError::Server {
                provider: self.provider,
                status: response.status,
                message,
            }
        })?;

        serde_json::from_value(payload).map_err(|e| {
            warn!(error = %e, "Payload failed validation");
            ApiError::parse(self.provider, &e)
        })
    }

    async fn cache_lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.config.cache.as_ref()?;
        let Some(raw) = cache.get(key).await else {
            debug!("Cache miss");
            return None;
        };

        match serde_json::from_value(raw) {
            Ok(value) => {
                debug!("Cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(error = %e, "Discarding cached value that no longer validates");
                None
            }
        }
    }

    async fn cache_store<T: Serialize>(&self, key: &str, value: &T) {
        let Some(cache) = &self.config.cache else {
            return;
        };

        match serde_json::to_value(value) {
            Ok(raw) => cache.set(key, raw, self.config.cache_ttl).await,
            Err(e) => warn!(error = %e, "Could not serialize value for cache"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
