//! Wise Old Man provider implementation.
//!
//! Player records, on-demand updates and snapshot history from the WOM v2
//! API. `update_player` is a POST that refreshes the cached player record.

mod api;
pub(crate) mod models;

pub use api::WiseOldManClient;
pub use models::{
    ActivityValue, BossValue, ComputedValue, ParsePeriodError, Period, Player, SkillValue, Snapshot,
    SnapshotData, SnapshotQuery,
};

use crate::descriptor::{OperationInfo, ProviderDescriptor};
use gielinor_core::ProviderKind;

const OPERATIONS: &[OperationInfo] = &[
    OperationInfo::get("get_player", "/players/{username}"),
    OperationInfo::post("update_player", "/players/{username}"),
    OperationInfo::get(
        "get_player_snapshots",
        "/players/{username}/snapshots?period=&startDate=&endDate=",
    ),
];

/// Returns the Wise Old Man descriptor.
pub fn wiseoldman_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::WiseOldMan,
        homepage: "https://wiseoldman.net",
        aliases: &["wiseoldman", "wom"],
        operations: OPERATIONS,
    }
}
