//! Birthday page visibility command handlers

use teloxide::{Bot, types::{Message, ParseMode}, prelude::*};
use tracing::warn;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::logging;

pub fn status_text(visible: bool) -> String {
    let status = if visible { "🟢 VISIBLE" } else { "🔴 HIDDEN" };
    format!(
        "<b>Birthday Page Status:</b> {}\n\nUse /showbirthday or /hidebirthday to change.",
        status
    )
}

/// Handle /status command
pub async fn handle_status(bot: Bot, msg: Message, services: &ServiceFactory) -> Result<()> {
    let visible = services.visibility_service.is_visible().await?;
    bot.send_message(msg.chat.id, status_text(visible))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Handle /showbirthday and /hidebirthday; admin chats only
pub async fn handle_set_visibility(bot: Bot, msg: Message, services: &ServiceFactory, visible: bool) -> Result<()> {
    let chat_id = msg.chat.id;

    if !services.is_admin(chat_id.0) {
        warn!(chat_id = ?chat_id, "Visibility change refused for non-admin chat");
        bot.send_message(chat_id, "❌ You are not authorized to use this command.").await?;
        return Ok(());
    }

    services.visibility_service.set_visible(visible).await?;
    logging::log_admin_action(
        chat_id.0,
        if visible { "show_birthday" } else { "hide_birthday" },
        None,
    );

    let text = if visible {
        "🎂 <b>Birthday page is now VISIBLE!</b>\n\nUsers can now access the birthday page."
    } else {
        "🔒 <b>Birthday page is now HIDDEN!</b>\n\nUsers cannot access the birthday page."
    };
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
