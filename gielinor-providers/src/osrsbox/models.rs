//! osrsbox-db record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An item record from `items-json/{id}.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrsboxItem {
    /// Item ID.
    pub id: u32,
    /// Item name.
    pub name: String,
    /// Every other field of the record, unvalidated.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A monster record from `monsters-json/{id}.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrsboxMonster {
    /// Monster ID.
    pub id: u32,
    /// Monster name.
    pub name: String,
    /// Every other field of the record, unvalidated.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OsrsboxItem {
    /// Returns a passthrough field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Returns true if the record marks the item as members-only.
    pub fn is_members(&self) -> bool {
        self.field("members").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Returns true if the item can be traded on the Grand Exchange.
    pub fn is_tradeable_on_ge(&self) -> bool {
        self.field("tradeable_on_ge")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Returns the Grand Exchange buy limit, if any.
    pub fn buy_limit(&self) -> Option<u64> {
        self.field("buy_limit").and_then(Value::as_u64)
    }
}

impl OsrsboxMonster {
    /// Returns a passthrough field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Returns the combat level, if recorded.
    pub fn combat_level(&self) -> Option<u64> {
        self.field("combat_level").and_then(Value::as_u64)
    }
}
