//! Telegram bot front end for the remote process management API.
//!
//! Users list processes and start, stop or restart them from Telegram using
//! a couple of commands and inline buttons.
//!
//! # Configuration
//!
//! The bot reads a JSON file (see [`senta_core::Settings`]):
//! - `tlg_token`: bot token from @BotFather
//! - `server`: root URL of the process API
//! - `api_token`: process API key
//! - `accepted_users`: optional username allow-list
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use senta_core::Settings;
//! use senta_telegram::SentaBot;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load("/etc/senta/bot.json")?;
//!     let bot = SentaBot::new(Arc::new(settings));
//!     bot.start_polling().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Commands
//!
//! - `/start` - Main menu with a "List Processes" button
//! - `/process_<id>` - Start / Stop / Restart buttons for one process

pub mod about;
pub mod bot;
pub mod cli;
pub mod command;
pub mod error;
pub mod event;
pub mod format;
pub mod handlers;

pub use about::About;
pub use bot::SentaBot;
pub use command::{parse_callback, parse_text, Command, CommandError};
pub use error::{Result, TelegramError};
pub use event::InboundEvent;
pub use format::{
    format_listing, listing_messages, process_keyboard, start_keyboard, Reply, MAX_MESSAGE_LEN,
};
pub use handlers::{BotHandler, Dispatch};
