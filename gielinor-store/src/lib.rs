// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Gielinor Store
//!
//! Persisted settings for the Gielinor clients.
//!
//! - **Settings**: global options and per-provider overrides, merged onto
//!   provider defaults by [`Settings::client_config`]
//! - **Persistence**: atomic, owner-only JSON file helpers
//!
//! ## Usage
//!
//! ```ignore
//! use gielinor_core::ProviderKind;
//! use gielinor_store::Settings;
//!
//! let settings = Settings::load_default().await?;
//! let cache = settings.build_cache().map(|c| c as _);
//! let config = settings.client_config(ProviderKind::Temple, cache);
//! ```

pub mod error;
pub mod persistence;
pub mod settings;

pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_settings_path, ensure_dir, load_json, load_json_or_default,
    save_json,
};
pub use settings::{LogLevel, ProviderSettings, Settings, USER_AGENT_ENV};
