//! Senta Core - settings shared by the Senta bot crates.
//!
//! - **config**: JSON settings file loading, env overrides and the user allow-list
//! - **error**: configuration errors

pub mod config;
pub mod error;

pub use config::{Settings, API_TOKEN_ENV, API_URL_SUFFIX, TLG_TOKEN_ENV};
pub use error::{ConfigError, Result};
