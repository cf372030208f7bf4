//! Core library for the `wu` CLI.
//!
//! This crate defines:
//! - API key loading
//! - The Weather Underground client behind the [`WeatherSource`] abstraction
//! - The bracket-token template engine
//! - Optional on-disk configuration
//!
//! It is used by `wu-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod credential;
pub mod diagnostics;
pub mod model;
pub mod provider;
pub mod template;

pub use config::Config;
pub use credential::{Credential, CredentialError};
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use model::{ApiError, Query, WeatherDocument};
pub use provider::{FetchError, WeatherSource, format_report, source_from_config};
pub use template::{Template, render};
