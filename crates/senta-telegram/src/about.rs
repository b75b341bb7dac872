//! Application name, build metadata and the help/version texts.

/// Display name of the application.
pub const APP_NAME: &str = "Senta - tlgbot";

const VERSION: &str = env!("CARGO_PKG_VERSION");
const COMMIT: &str = env!("SENTA_COMMIT");
const COMMIT_DATE: &str = env!("SENTA_COMMIT_DATE");

/// Build information printed by `help` and `version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct About {
    pub app_name: &'static str,
    pub version: &'static str,
    pub commit: &'static str,
    /// Commit time, UTC.
    pub commit_date: &'static str,
    /// How the binary was invoked (`argv[0]`).
    pub bin: String,
}

impl About {
    /// Build metadata for the running binary.
    pub fn current() -> Self {
        let bin = std::env::args()
            .next()
            .unwrap_or_else(|| "senta-bot".to_string());
        Self::with_bin(bin)
    }

    pub fn with_bin(bin: impl Into<String>) -> Self {
        Self {
            app_name: APP_NAME,
            version: VERSION,
            commit: COMMIT,
            commit_date: COMMIT_DATE,
            bin: bin.into(),
        }
    }

    /// Format: "0.3.0 (1a2b3c4d, 2026-01-29 10:15:00)"
    pub fn version_string(&self) -> String {
        format!("{} ({}, {})", self.version, self.commit, self.commit_date)
    }

    pub fn version_text(&self) -> String {
        format!("{} {}\n", self.app_name, self.version_string())
    }

    pub fn usage_text(&self) -> String {
        format!(
            "{name} {version}\n\
             Telegram bot for managing remote processes.\n\n\
             Usage:\n\
             \x20 {bin} <config-path>     start the bot with a JSON config file\n\
             \x20 {bin} help              show this help\n\
             \x20 {bin} version           show version information\n\n\
             Options:\n\
             \x20 -h, --help              show this help\n\
             \x20 -v, --version           show version information\n\
             \x20     --verbose           more logging (repeat for trace)\n\n\
             Config file fields:\n\
             \x20 tlg_token               Telegram bot token\n\
             \x20 server                  process API root, e.g. https://host:8080\n\
             \x20 api_token               process API key\n\
             \x20 accepted_users          optional list of allowed usernames\n\n\
             Environment:\n\
             \x20 SENTA_TLG_TOKEN         overrides tlg_token\n\
             \x20 SENTA_API_TOKEN         overrides api_token\n\
             \x20 RUST_LOG                log filter\n",
            name = self.app_name,
            version = self.version_string(),
            bin = self.bin,
        )
    }
}
