//! Provider registry.
//!
//! Static access to every provider descriptor, looked up by kind or by any
//! name accepted on the command line.

use gielinor_core::ProviderKind;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::collectionlog::collectionlog_descriptor;
use crate::descriptor::ProviderDescriptor;
use crate::osrsbox::osrsbox_descriptor;
use crate::temple::temple_descriptor;
use crate::wiseoldman::wiseoldman_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

static DESCRIPTORS: OnceLock<Vec<ProviderDescriptor>> = OnceLock::new();

static CLI_NAME_MAP: OnceLock<HashMap<&'static str, ProviderKind>> = OnceLock::new();

fn init_descriptors() -> Vec<ProviderDescriptor> {
    vec![
        collectionlog_descriptor(),
        osrsbox_descriptor(),
        temple_descriptor(),
        wiseoldman_descriptor(),
    ]
}

fn build_cli_name_map(descriptors: &[ProviderDescriptor]) -> HashMap<&'static str, ProviderKind> {
    let mut map = HashMap::new();
    for desc in descriptors {
        map.insert(desc.cli_name(), desc.id);
        for alias in desc.aliases {
            map.insert(*alias, desc.id);
        }
    }
    map
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Global registry of provider descriptors.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider descriptors.
    pub fn all() -> &'static [ProviderDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a provider descriptor by kind.
    pub fn get(id: ProviderKind) -> Option<&'static ProviderDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Looks up a provider by CLI name or alias.
    pub fn get_by_cli_name(name: &str) -> Option<&'static ProviderDescriptor> {
        let map = CLI_NAME_MAP.get_or_init(|| build_cli_name_map(Self::all()));
        let kind = map.get(name.trim().to_lowercase().as_str())?;
        Self::get(*kind)
    }
}

// ============================================================================
// Tests
// ============================================================================
