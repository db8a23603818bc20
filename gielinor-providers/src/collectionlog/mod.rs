//! collectionlog.net provider implementation.
//!
//! Fetches a player's full collection log: tabs, pages, items and kill
//! counts, as uploaded by the RuneLite collection-log plugin.

mod api;
pub(crate) mod models;

pub use api::CollectionLogClient;
pub use models::{CollectionLog, CollectionLogItem, CollectionLogPage, CollectionLogResponse, KillCount};

use crate::descriptor::{OperationInfo, ProviderDescriptor};
use gielinor_core::ProviderKind;

const OPERATIONS: &[OperationInfo] = &[
    OperationInfo::get("get_user_collection_log", "/user/{username}"),
];

/// Returns the collectionlog.net descriptor.
pub fn collectionlog_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::CollectionLog,
        homepage: "https://collectionlog.net",
        aliases: &["collection-log", "clog"],
        operations: OPERATIONS,
    }
}
