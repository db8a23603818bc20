// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Gielinor Fetch
//!
//! Request infrastructure shared by every Gielinor provider client.
//!
//! - [`http`] - One JSON request: query building, default headers, timeout
//!   and cancellation, non-2xx classification into [`HttpError`]
//! - [`cache`] - The [`Cache`] trait, the in-memory [`MemoryCache`] and the
//!   [`build_cache_key`] helper
//! - [`retry`] - [`RetryStrategy`]: attempt budget and exponential backoff
//! - [`client`] - [`ApiClient`], the provider-parameterised pipeline
//!   (cache → retry → classify → validate → cache)
//!
//! ## Example
//!
//! ```ignore
//! use gielinor_core::ProviderKind;
//! use gielinor_fetch::{ApiCall, ApiClient, ClientConfig, MemoryCache, ProviderHooks};
//! use std::sync::Arc;
//!
//! let config = ClientConfig::for_provider(ProviderKind::WiseOldMan)
//!     .with_cache(Arc::new(MemoryCache::new()));
//! let client = ApiClient::new(ProviderKind::WiseOldMan, config, ProviderHooks::default());
//!
//! let url = client.url(&["players", "zezima"])?;
//! let key = client.cache_key("player", [Some("zezima")]);
//! let player: serde_json::Value = client.execute(ApiCall::get("player", url, key)).await?;
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod http;
pub mod retry;

pub use cache::{Cache, CacheEntry, MemoryCache, build_cache_key, ttl_from_millis};
pub use client::{
    ApiCall, ApiClient, CacheMode, ClientConfig, ProviderHooks, classify, standard_error_message,
};
pub use error::HttpError;
pub use http::{HttpClient, JsonResponse, Request};
pub use retry::RetryStrategy;

pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;
