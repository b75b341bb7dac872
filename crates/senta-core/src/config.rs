//! Bot settings loaded from a JSON file.
//!
//! The settings file looks like:
//!
//! ```json
//! {
//!   "tlg_token": "123456:ABC-DEF",
//!   "server": "https://astra.example.com",
//!   "api_token": "secret",
//!   "accepted_users": ["alice", "bob"]
//! }
//! ```
//!
//! `accepted_users` is optional. When it is present and non-empty only the
//! listed Telegram usernames may talk to the bot.
//!
//! # Environment Variables
//!
//! - `SENTA_TLG_TOKEN`: overrides `tlg_token`
//! - `SENTA_API_TOKEN`: overrides `api_token`

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

/// Environment variable overriding the Telegram bot token.
pub const TLG_TOKEN_ENV: &str = "SENTA_TLG_TOKEN";

/// Environment variable overriding the remote API key.
pub const API_TOKEN_ENV: &str = "SENTA_API_TOKEN";

/// Path of the process API relative to the server root.
pub const API_URL_SUFFIX: &str = "rest/api/v1";

/// Immutable bot settings.
///
/// Built once at startup and shared behind an `Arc` by the client and the
/// dispatcher.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Telegram bot token from @BotFather.
    pub tlg_token: String,
    /// Base URL of the remote process API, e.g. `https://host:8080`.
    pub server: String,
    /// Key sent in the `api_key` header of every remote call.
    pub api_token: String,
    /// Usernames allowed to use the bot. Empty means everyone.
    #[serde(default)]
    pub accepted_users: Vec<String>,
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&content)?;

        info!(
            path = %path.display(),
            server = %settings.server,
            accepted_users = settings.accepted_users.len(),
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Parse settings from a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply `SENTA_TLG_TOKEN` / `SENTA_API_TOKEN` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using `lookup` to resolve variable names.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TLG_TOKEN_ENV).filter(|v| !v.is_empty()) {
            debug!(var = TLG_TOKEN_ENV, "Overriding tlg_token from environment");
            self.tlg_token = token;
        }
        if let Some(token) = lookup(API_TOKEN_ENV).filter(|v| !v.is_empty()) {
            debug!(var = API_TOKEN_ENV, "Overriding api_token from environment");
            self.api_token = token;
        }
    }

    /// Check that the fields the bot cannot run without are set.
    pub fn validate(&self) -> Result<()> {
        if self.tlg_token.trim().is_empty() {
            return Err(ConfigError::Invalid("tlg_token is empty".into()));
        }
        if self.server.trim().is_empty() {
            return Err(ConfigError::Invalid("server is empty".into()));
        }
        Ok(())
    }

    /// Whether a user may use the bot.
    ///
    /// With a non-empty allow-list a missing username is never accepted.
    pub fn is_accepted(&self, username: Option<&str>) -> bool {
        if self.accepted_users.is_empty() {
            return true;
        }
        match username {
            Some(name) => self.accepted_users.iter().any(|u| u == name),
            None => false,
        }
    }

    /// Root URL of the process API: `{server}/rest/api/v1`.
    pub fn api_base_url(&self) -> String {
        format!("{}/{}", self.server.trim_end_matches('/'), API_URL_SUFFIX)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("tlg_token", &mask_token(&self.tlg_token))
            .field("server", &self.server)
            .field("api_token", &mask_token(&self.api_token))
            .field("accepted_users", &self.accepted_users)
            .finish()
    }
}

/// Mask a secret for logging: first 4 and last 4 characters, or `***` when short.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
