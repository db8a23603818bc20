//! Domain models shared by every Gielinor crate.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider identity and per-provider defaults

mod provider;

pub use provider::ProviderKind;
#[cfg(test)]
mod serde_tests;
