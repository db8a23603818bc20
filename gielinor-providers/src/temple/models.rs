//! TempleOSRS payload types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Temple payload: endpoints answer with either an object or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TempleData {
    /// Keyed record (player info, stats, gains).
    Object(Map<String, Value>),
    /// List of records (datapoints).
    Array(Vec<Value>),
}

impl TempleData {
    /// Returns the object form, if any.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            Self::Array(_) => None,
        }
    }

    /// Returns the array form, if any.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            Self::Object(_) => None,
        }
    }

    /// Looks up a field of the object form.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    /// Returns the number of fields or elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Object(map) => map.len(),
            Self::Array(items) => items.len(),
        }
    }

    /// Returns true if there are no fields or elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
