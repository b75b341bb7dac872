//! Outbound message text and inline keyboards.

use senta_client::{ProcessAction, RemoteProcess};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::command::{action_payload, LIST_PROCESSES};

/// Text sent above every keyboard.
pub const CHOOSE_ACTION: &str = "Choose an action:";

/// Telegram's text limit, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Leading glyph of each listing line.
const PROCESS_ICON: &str = "📺";
const ACTIVE_ICON: &str = "🟢";
const INACTIVE_ICON: &str = "🔴";

/// A message to send back to the chat the event came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    /// Plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    /// Reply carrying an inline keyboard.
    pub fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Main menu: a single "List Processes" button.
pub fn start_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "List Processes",
        LIST_PROCESSES,
    )]])
}

/// Start / Stop / Restart buttons for one process, in a single row.
pub fn process_keyboard(id: u64) -> InlineKeyboardMarkup {
    let row = ProcessAction::ALL
        .into_iter()
        .map(|action| InlineKeyboardButton::callback(action.label(), action_payload(action, id)))
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(vec![row])
}

/// One line per process, in the order the API returned them.
pub fn format_listing(processes: &[RemoteProcess]) -> String {
    if processes.is_empty() {
        return "No processes found.".to_string();
    }

    let mut text = String::new();
    for process in processes {
        let status = if process.is_active {
            ACTIVE_ICON
        } else {
            INACTIVE_ICON
        };
        text.push_str(&format!(
            "{}: {}, {} /process_{}\n",
            PROCESS_ICON, process.name, status, process.id
        ));
    }
    text
}

/// The listing split into messages Telegram will accept.
pub fn listing_messages(processes: &[RemoteProcess]) -> Vec<String> {
    split_text(&format_listing(processes), MAX_MESSAGE_LEN)
}

/// Split on line boundaries so no chunk exceeds `limit` UTF-16 units.
fn split_text(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        for piece in cut_line(line, limit) {
            let len = piece.encode_utf16().count();
            if current_len + len > limit && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push_str(piece);
            current_len += len;
        }
    }
    chunks.push(current);

    // Telegram rejects blank messages
    chunks.retain(|c| !c.trim().is_empty());
    chunks
}

/// Cut an overlong line at char boundaries.
fn cut_line(line: &str, limit: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut len = 0;

    for (idx, ch) in line.char_indices() {
        let width = ch.len_utf16();
        if len + width > limit && idx > start {
            pieces.push(&line[start..idx]);
            start = idx;
            len = 0;
        }
        len += width;
    }
    if start < line.len() {
        pieces.push(&line[start..]);
    }
    pieces
}
