// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Gielinor Core
//!
//! Core types and the error taxonomy shared by the Gielinor API clients.
//!
//! ## Key Types
//!
//! - [`ProviderKind`] - Enum of the supported upstream APIs, with their
//!   default base URL, timeout and cache TTL
//! - [`ApiError`] - The single error type returned by client operations
//! - [`ErrorKind`] - Discriminant of [`ApiError`] (`not_found`,
//!   `rate_limit`, `server_error`, `parse_error`, ...)
//! - [`CoreError`] - Configuration and lookup errors

pub mod error;
pub mod models;

pub use error::{ApiError, CoreError, ErrorKind};
pub use models::ProviderKind;
