//! Main Telegram bot implementation.

use std::sync::Arc;

use senta_client::{ProcessApi, RemoteClient};
use senta_core::Settings;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId};
use tracing::{debug, info, warn};

use crate::error::{Result, TelegramError};
use crate::event::InboundEvent;
use crate::format::Reply;
use crate::handlers::{BotHandler, Dispatch};

/// The Senta Telegram bot.
pub struct SentaBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Shared handler across update endpoints.
    handler: Arc<BotHandler>,
}

impl SentaBot {
    /// Create a bot talking to the process API named in `settings`.
    pub fn new(settings: Arc<Settings>) -> Self {
        let api: Arc<dyn ProcessApi> = Arc::new(RemoteClient::from_settings(&settings));
        Self::with_api(settings, api)
    }

    /// Create a bot with a custom process API implementation.
    pub fn with_api(settings: Arc<Settings>, api: Arc<dyn ProcessApi>) -> Self {
        let bot = Bot::new(settings.tlg_token.clone());
        Self {
            bot,
            handler: Arc::new(BotHandler::new(settings, api)),
        }
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| TelegramError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Start long polling until Ctrl+C.
    ///
    /// Updates from the same chat are handled one at a time, in arrival order;
    /// different chats are handled concurrently.
    pub async fn start_polling(&self) -> Result<()> {
        info!("Starting Telegram bot in polling mode...");

        let for_callbacks = Arc::clone(&self.handler);
        let for_messages = Arc::clone(&self.handler);

        let handler = dptree::entry()
            .branch(
                Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                    let handler = Arc::clone(&for_callbacks);
                    async move { on_callback(bot, q, handler).await }
                }),
            )
            .branch(
                Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                    let handler = Arc::clone(&for_messages);
                    async move { on_message(bot, msg, handler).await }
                }),
            );

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(self.bot.clone(), handler)
            .default_handler(|upd| async move {
                debug!(update_id = ?upd.id, "Unhandled update");
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Bot stopped");
        Ok(())
    }
}

async fn on_message(bot: Bot, msg: Message, handler: Arc<BotHandler>) -> ResponseResult<()> {
    let Some(event) = InboundEvent::from_message(&msg) else {
        return Ok(());
    };

    let outcome = handler.handle(&event).await;
    deliver(&bot, event.chat_id(), outcome).await;
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, handler: Arc<BotHandler>) -> ResponseResult<()> {
    let Some(event) = InboundEvent::from_callback(&q) else {
        debug!(user_id = %q.from.id, "Callback query without data");
        return Ok(());
    };

    // stop the button spinner, but never acknowledge users outside the allow-list
    if handler.settings().is_accepted(event.username()) {
        if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
            debug!(error = %e, "Failed to answer callback query");
        }
    }

    let outcome = handler.handle(&event).await;
    deliver(&bot, event.chat_id(), outcome).await;
    Ok(())
}

/// Send replies in order. Failures are logged and dropped.
async fn deliver(bot: &Bot, chat_id: ChatId, outcome: Dispatch) {
    let Dispatch::Replies(replies) = outcome else {
        return;
    };

    for Reply { text, keyboard } in replies {
        let mut req = bot.send_message(chat_id, text);
        if let Some(kb) = keyboard {
            req = req.reply_markup(kb);
        }
        if let Err(e) = req.await {
            warn!(chat_id = %chat_id, error = %e, "Failed to send message");
        }
    }
}
