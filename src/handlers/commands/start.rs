//! Start command handler

use teloxide::{Bot, types::{Message, ParseMode}, prelude::*};
use tracing::debug;
use crate::utils::errors::Result;

/// Welcome text, including the chat id the admin has to put into `bot.admin_ids`
pub fn welcome_text(chat_id: i64) -> String {
    format!(
        "🎂 <b>Birthday Gift Bot</b>\n\n\
         I'll notify you when someone completes all birthday games and needs their reward!\n\n\
         <b>Commands:</b>\n\
         /pending - Show pending rewards\n\
         /help - Show help message\n\n\
         Your chat ID: <code>{}</code>",
        chat_id
    )
}

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id;
    debug!(chat_id = ?chat_id, "Processing /start command");

    bot.send_message(chat_id, welcome_text(chat_id.0))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
