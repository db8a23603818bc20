// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Gielinor Providers
//!
//! Clients for the Old School RuneScape data APIs and the RuneLite bank-tag
//! export parser.
//!
//! Every client runs its calls through [`gielinor_fetch::ApiClient`]: cache
//! check, request with retry, error classification, payload validation and
//! cache write. Provider modules contribute URL building, error-envelope
//! handling and payload types.
//!
//! ## Providers
//!
//! | Provider | Client | Operations | Default TTL |
//! |----------|--------|------------|-------------|
//! | collectionlog.net | [`CollectionLogClient`] | collection log | 10 min |
//! | osrsbox-db | [`OsrsboxClient`] | items, monsters (single and batch) | 24 h |
//! | TempleOSRS | [`TempleClient`] | info, stats, gains, datapoints | 5 min |
//! | Wise Old Man | [`WiseOldManClient`] | player, update, snapshots | 5 min |
//!
//! ## Usage
//!
//! ```ignore
//! use gielinor_fetch::{ClientConfig, MemoryCache};
//! use gielinor_providers::GielinorClients;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(MemoryCache::new());
//! let clients = GielinorClients::new(|kind| ClientConfig::for_provider(kind).with_cache(cache.clone()));
//!
//! let player = clients.wise_old_man.get_player("zezima").await?;
//! let gains = clients.temple.get_player_gains("zezima", Some("week")).await?;
//! ```

pub mod banktags;
pub mod clients;
pub mod descriptor;
mod player;
pub mod registry;

// Provider modules (alphabetical)
pub mod collectionlog;
pub mod osrsbox;
pub mod temple;
pub mod wiseoldman;

pub use banktags::{
    BankTag, BankTagError, BankTagImport, BankTagLayout, BankTagRejection, LayoutPosition,
    parse_bank_tag_export,
};
pub use clients::GielinorClients;
pub use descriptor::{OperationInfo, ProviderDescriptor};
pub use registry::ProviderRegistry;

pub use collectionlog::{CollectionLogClient, CollectionLogResponse};
pub use osrsbox::{OsrsboxClient, OsrsboxItem, OsrsboxMonster};
pub use temple::{TempleClient, TempleData, TempleEndpoint};
pub use wiseoldman::{Period, Player, Snapshot, SnapshotQuery, WiseOldManClient};
