//! Error types for the Telegram bot.

use senta_core::ConfigError;
use thiserror::Error;

/// Errors that stop the bot from starting.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Settings could not be loaded or are incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Telegram rejected the bot (bad token, network down).
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),
}

/// Result type for Telegram operations.
pub type Result<T> = std::result::Result<T, TelegramError>;
