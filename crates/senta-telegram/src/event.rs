//! Transport-neutral view of the Telegram updates the bot reacts to.

use teloxide::types::{CallbackQuery, ChatId, Message};

/// An inbound chat event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A text message.
    Text {
        chat_id: ChatId,
        username: Option<String>,
        text: String,
    },
    /// An inline button press.
    Callback {
        chat_id: ChatId,
        username: Option<String>,
        data: String,
    },
}

impl InboundEvent {
    /// Build an event from a message. `None` for messages without text.
    pub fn from_message(msg: &Message) -> Option<Self> {
        let text = msg.text()?;
        Some(Self::Text {
            chat_id: msg.chat.id,
            username: msg.from.as_ref().and_then(|u| u.username.clone()),
            text: text.to_string(),
        })
    }

    /// Build an event from a callback query. `None` when it carries no data.
    ///
    /// Replies go to the chat holding the pressed button, or to the user's
    /// private chat when that message is no longer available.
    pub fn from_callback(q: &CallbackQuery) -> Option<Self> {
        let data = q.data.clone()?;
        let chat_id = q
            .message
            .as_ref()
            .map(|m| m.chat().id)
            .unwrap_or_else(|| ChatId::from(q.from.id));
        Some(Self::Callback {
            chat_id,
            username: q.from.username.clone(),
            data,
        })
    }

    pub fn chat_id(&self) -> ChatId {
        match self {
            Self::Text { chat_id, .. } | Self::Callback { chat_id, .. } => *chat_id,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Text { username, .. } | Self::Callback { username, .. } => username.as_deref(),
        }
    }
}
