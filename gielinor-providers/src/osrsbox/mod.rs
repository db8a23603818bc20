//! osrsbox-db provider implementation.
//!
//! Static JSON item and monster records served as one file per ID. Records
//! are validated for `id` and `name`; every other field is passed through.

mod api;
pub(crate) mod models;

pub use api::OsrsboxClient;
pub use models::{OsrsboxItem, OsrsboxMonster};

use crate::descriptor::{OperationInfo, ProviderDescriptor};
use gielinor_core::ProviderKind;

const OPERATIONS: &[OperationInfo] = &[
    OperationInfo::get("get_item", "/items-json/{id}.json"),
    OperationInfo::get("get_items", "/items-json/{id}.json"),
    OperationInfo::get("get_monster", "/monsters-json/{id}.json"),
    OperationInfo::get("get_monsters", "/monsters-json/{id}.json"),
];

/// Returns the osrsbox-db descriptor.
pub fn osrsbox_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::Osrsbox,
        homepage: "https://www.osrsbox.com",
        aliases: &[],
        operations: OPERATIONS,
    }
}
