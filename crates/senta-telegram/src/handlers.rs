//! Command handlers for the Telegram bot.
//!
//! [`BotHandler`] turns one [`InboundEvent`] into the replies to send. It does
//! not touch the Telegram API itself, so the whole flow can be driven with a
//! stub [`ProcessApi`].

use std::sync::Arc;

use senta_client::{ProcessAction, ProcessApi, RemoteError};
use senta_core::Settings;
use tracing::{debug, info, warn};

use crate::command::{parse_callback, parse_text, Command};
use crate::event::InboundEvent;
use crate::format::{listing_messages, process_keyboard, start_keyboard, Reply, CHOOSE_ACTION};

/// Outcome of handling one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Sender is not on the allow-list. Nothing is sent.
    Dropped,
    /// Not a command this bot knows.
    Ignored,
    /// Replies to send, in order.
    Replies(Vec<Reply>),
}

/// Routes inbound events to the process API and builds the replies.
pub struct BotHandler {
    settings: Arc<Settings>,
    api: Arc<dyn ProcessApi>,
}

impl BotHandler {
    pub fn new(settings: Arc<Settings>, api: Arc<dyn ProcessApi>) -> Self {
        Self { settings, api }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handle one event to completion.
    pub async fn handle(&self, event: &InboundEvent) -> Dispatch {
        if !self.settings.is_accepted(event.username()) {
            warn!(
                chat_id = %event.chat_id(),
                user = ?event.username(),
                "User not in accepted_users, dropping update"
            );
            return Dispatch::Dropped;
        }

        let parsed = match event {
            InboundEvent::Text { text, .. } => parse_text(text),
            InboundEvent::Callback { data, .. } => parse_callback(data),
        };

        let command = match parsed {
            None => {
                debug!(chat_id = %event.chat_id(), "Ignoring unrecognized input");
                return Dispatch::Ignored;
            }
            Some(Err(e)) => {
                info!(chat_id = %event.chat_id(), error = %e, "Rejected malformed command");
                return Dispatch::Replies(vec![Reply::text(e.to_string())]);
            }
            Some(Ok(command)) => command,
        };

        info!(chat_id = %event.chat_id(), user = ?event.username(), command = ?command, "Handling command");
        Dispatch::Replies(self.execute(command).await)
    }

    async fn execute(&self, command: Command) -> Vec<Reply> {
        match command {
            Command::Start => vec![handle_start()],
            Command::ShowProcess { id } => vec![handle_show_process(id)],
            Command::ListProcesses => self.handle_list().await,
            Command::Action { action, id } => vec![self.handle_action(action, id).await],
        }
    }

    /// List processes, then offer the main menu again.
    async fn handle_list(&self) -> Vec<Reply> {
        match self.api.list_processes().await {
            Ok(processes) => {
                let mut replies: Vec<Reply> = listing_messages(&processes)
                    .into_iter()
                    .map(Reply::text)
                    .collect();
                replies.push(handle_start());
                replies
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch processes");
                vec![Reply::text(format!("Failed to fetch processes: {}", e))]
            }
        }
    }

    async fn handle_action(&self, action: ProcessAction, id: u64) -> Reply {
        match self.api.perform_action(action, id).await {
            Ok(result) => {
                info!(action = %action, id, "Process action completed");
                Reply::text(result.message)
            }
            Err(RemoteError::ProcessNotFound) => Reply::text("Process not found"),
            Err(e) => {
                warn!(action = %action, id, error = %e, "Process action failed");
                Reply::text(format!("Failed to {} process: {}", action, e))
            }
        }
    }
}

/// `/start`: the main menu.
fn handle_start() -> Reply {
    Reply::with_keyboard(CHOOSE_ACTION, start_keyboard())
}

/// `/process_<id>`: the action buttons for one process.
fn handle_show_process(id: u64) -> Reply {
    Reply::with_keyboard(CHOOSE_ACTION, process_keyboard(id))
}
