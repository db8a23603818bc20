//! collectionlog.net response types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response from `GET /user/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionLogResponse {
    /// Collection log record ID.
    pub collection_log_id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// The log itself.
    pub collection_log: CollectionLog,
}

/// A player's collection log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionLog {
    /// Player name as uploaded.
    pub username: String,
    /// Account type (`NORMAL`, `IRONMAN`, ...).
    pub account_type: String,
    /// Number of distinct items obtained.
    pub unique_obtained: u32,
    /// Number of distinct items in the log.
    pub unique_items: u32,
    /// Tab name → page name → page.
    pub tabs: BTreeMap<String, BTreeMap<String, CollectionLogPage>>,
}

/// One page of a collection log tab (a boss, raid, clue tier, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionLogPage {
    /// Items on the page.
    pub items: Vec<CollectionLogItem>,
    /// Kill counts shown on the page.
    #[serde(default)]
    pub kill_count: Vec<KillCount>,
}

/// A collection log slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionLogItem {
    /// Item ID.
    pub id: i64,
    /// Item name.
    pub name: String,
    /// Quantity obtained.
    pub quantity: i64,
    /// Whether the slot is filled.
    pub obtained: bool,
    /// Position of the item on its page.
    #[serde(default)]
    pub sequence: Option<i64>,
    /// When the item was first obtained, if known.
    #[serde(default)]
    pub obtained_at: Option<String>,
}

/// A kill count line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillCount {
    /// Counter label.
    pub name: String,
    /// Counter value.
    pub amount: i64,
}

impl CollectionLog {
    /// Returns the page with the given name from any tab.
    pub fn page(&self, name: &str) -> Option<&CollectionLogPage> {
        self.tabs.values().find_map(|pages| pages.get(name))
    }

    /// Iterates every obtained item across all tabs.
    pub fn obtained_items(&self) -> impl Iterator<Item = &CollectionLogItem> {
        self.tabs
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(|page| page.items.iter())
            .filter(|item| item.obtained)
    }

    /// Returns completion as a fraction in `[0, 1]`.
    pub fn completion(&self) -> f64 {
        if self.unique_items == 0 {
            return 0.0;
        }
        f64::from(self.unique_obtained) / f64::from(self.unique_items)
    }
}

impl CollectionLogPage {
    /// Returns how many items on the page are obtained.
    pub fn obtained_count(&self) -> usize {
        self.items.iter().filter(|item| item.obtained).count()
    }
}
