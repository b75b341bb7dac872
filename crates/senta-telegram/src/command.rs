//! Parsing of chat commands and inline button payloads.
//!
//! Text commands:
//! - `/start` - show the main menu
//! - `/process_<id>` - show the actions for one process
//!
//! Button payloads:
//! - `list_processes`
//! - `process_start_<id>`, `process_stop_<id>`, `process_restart_<id>`

use senta_client::ProcessAction;
use thiserror::Error;

/// Payload of the "List Processes" button.
pub const LIST_PROCESSES: &str = "list_processes";

/// Prefix shared by the per-process action payloads.
const PROCESS_PREFIX: &str = "process";

/// A user request, fully parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/process_<id>`
    ShowProcess { id: u64 },
    /// `list_processes` button.
    ListProcesses,
    /// `process_<action>_<id>` button.
    Action { action: ProcessAction, id: u64 },
}

/// Malformed command or payload. The message is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Invalid command format. Usage: /process_<id>")]
    InvalidProcessCommand,

    #[error("Usage: button '{0}_process_<id>'")]
    InvalidActionPayload(ProcessAction),
}

/// Build the payload for an action button.
pub fn action_payload(action: ProcessAction, id: u64) -> String {
    format!("{}_{}_{}", PROCESS_PREFIX, action, id)
}

/// Parse a text message.
///
/// Returns `None` for text that is not a recognized command.
pub fn parse_text(text: &str) -> Option<Result<Command, CommandError>> {
    if text.starts_with("/start") {
        return Some(Ok(Command::Start));
    }

    if text.starts_with("/process") {
        return Some(parse_process_command(text));
    }

    None
}

fn parse_process_command(text: &str) -> Result<Command, CommandError> {
    let token = text.split_whitespace().next().unwrap_or_default();
    // "/process_12@senta_bot" in group chats
    let token = token.split('@').next().unwrap_or_default();

    let parts: Vec<&str> = token.split('_').collect();
    if parts.len() < 2 {
        return Err(CommandError::InvalidProcessCommand);
    }

    parse_id(parts[1])
        .map(|id| Command::ShowProcess { id })
        .ok_or(CommandError::InvalidProcessCommand)
}

/// Parse an inline button payload.
///
/// Returns `None` for payloads this bot never produces.
pub fn parse_callback(data: &str) -> Option<Result<Command, CommandError>> {
    if data == LIST_PROCESSES {
        return Some(Ok(Command::ListProcesses));
    }

    let action = ProcessAction::ALL
        .into_iter()
        .find(|action| data.starts_with(&format!("{}_{}", PROCESS_PREFIX, action)))?;

    Some(parse_action_payload(data, action))
}

fn parse_action_payload(data: &str, action: ProcessAction) -> Result<Command, CommandError> {
    let parts: Vec<&str> = data.split('_').collect();
    match parts.as_slice() {
        [PROCESS_PREFIX, name, id] if *name == action.as_str() => parse_id(id)
            .map(|id| Command::Action { action, id })
            .ok_or(CommandError::InvalidActionPayload(action)),
        _ => Err(CommandError::InvalidActionPayload(action)),
    }
}

/// Process ids are plain non-negative integers.
fn parse_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
