//! Provider descriptors.
//!
//! A descriptor is the static, display-oriented description of a provider:
//! where it lives, what it is called on the command line and which
//! operations its client exposes. Runtime settings live in
//! [`gielinor_fetch::ClientConfig`].

use gielinor_core::ProviderKind;
use serde::Serialize;

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Static description of a provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderDescriptor {
    /// Provider identifier.
    pub id: ProviderKind,
    /// Public website of the upstream service.
    pub homepage: &'static str,
    /// Extra names accepted on the command line.
    pub aliases: &'static [&'static str],
    /// Operations the client exposes.
    pub operations: &'static [OperationInfo],
}

impl ProviderDescriptor {
    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        self.id.display_name()
    }

    /// Returns the CLI name.
    pub fn cli_name(&self) -> &'static str {
        self.id.cli_name()
    }

    /// Finds an operation by client method name.
    pub fn operation(&self, name: &str) -> Option<&'static OperationInfo> {
        self.operations.iter().find(|op| op.name == name)
    }
}

// ============================================================================
// Operation Info
// ============================================================================

/// One client operation and the upstream route it calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationInfo {
    /// Client method name.
    pub name: &'static str,
    /// HTTP method.
    pub method: &'static str,
    /// Route relative to the base URL.
    pub route: &'static str,
}

impl OperationInfo {
    /// Describes a GET operation.
    pub const fn get(name: &'static str, route: &'static str) -> Self {
        Self {
            name,
            method: "GET",
            route,
        }
    }

    /// Describes a POST operation.
    pub const fn post(name: &'static str, route: &'static str) -> Self {
        Self {
            name,
            method: "POST",
            route,
        }
    }
}
