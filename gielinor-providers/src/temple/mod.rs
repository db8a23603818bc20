//! TempleOSRS provider implementation.
//!
//! Temple reports some failures with HTTP 200 inside a
//! `{ status, message?, error?, data }` envelope; see [`envelope`].

mod api;
pub mod envelope;
pub(crate) mod models;

pub use api::{TempleClient, TempleEndpoint};
pub use models::TempleData;

use crate::descriptor::{OperationInfo, ProviderDescriptor};
use gielinor_core::ProviderKind;

const OPERATIONS: &[OperationInfo] = &[
    OperationInfo::get("get_player_info", "/player_info.php?player={username}"),
    OperationInfo::get("get_player_stats", "/player_stats.php?player={username}"),
    OperationInfo::get("get_player_gains", "/player_gains.php?player={username}&period="),
    OperationInfo::get(
        "get_player_datapoints",
        "/player_datapoints.php?player={username}&interval=",
    ),
];

/// Returns the TempleOSRS descriptor.
pub fn temple_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::Temple,
        homepage: "https://templeosrs.com",
        aliases: &["templeosrs"],
        operations: OPERATIONS,
    }
}
