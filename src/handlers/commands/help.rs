//! Help command handler

use teloxide::{Bot, types::{Message, ParseMode}, prelude::*};
use teloxide::utils::html;
use crate::utils::errors::Result;

pub fn help_text(reward_label: &str) -> String {
    format!(
        "🎁 <b>Birthday Gift Bot Help</b>\n\n\
         This bot manages birthday gift rewards.\n\n\
         <b>How it works:</b>\n\
         1. User completes 3 mini-games on the website\n\
         2. You receive a notification here\n\
         3. Send the gift ({}) manually\n\
         4. Click \"Confirm Sent\" button\n\
         5. User sees confirmation on their screen\n\n\
         <b>Commands:</b>\n\
         /pending - Show all pending rewards\n\
         /status - Show birthday page visibility\n\
         /showbirthday - Make the birthday page visible\n\
         /hidebirthday - Hide the birthday page\n\
         /help - Show this message",
        html::escape(reward_label)
    )
}

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message, reward_label: &str) -> Result<()> {
    bot.send_message(msg.chat.id, help_text(reward_label))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
