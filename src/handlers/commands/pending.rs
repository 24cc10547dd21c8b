//! Pending rewards command handler

use teloxide::{Bot, types::{Message, ParseMode}, prelude::*};
use teloxide::utils::html;
use tracing::{debug, info};
use crate::models::Session;
use crate::services::ServiceFactory;
use crate::services::notification::confirm_keyboard;
use crate::utils::errors::Result;
use crate::utils::helpers::{format_timestamp, short_id};

/// Summary of all pending sessions, `None` when there are none
pub fn pending_summary(sessions: &[Session]) -> Option<String> {
    if sessions.is_empty() {
        return None;
    }

    let mut text = String::from("📋 <b>Pending Rewards:</b>\n\n");
    for session in sessions {
        text.push_str(&format!(
            "• Session: <code>{}</code>\n  Created: {}\n\n",
            html::escape(&short_id(&session.session_id)),
            format_timestamp(session.created_at)
        ));
    }
    Some(text)
}

/// Handle /pending command - list pending rewards with confirm buttons
pub async fn handle_pending(bot: Bot, msg: Message, services: &ServiceFactory) -> Result<()> {
    let chat_id = msg.chat.id;
    debug!(chat_id = ?chat_id, "Processing /pending command");

    let pending = services.progress_service.list_pending().await?;
    let summary = match pending_summary(&pending) {
        Some(summary) => summary,
        None => {
            bot.send_message(chat_id, "✅ No pending rewards at the moment.").await?;
            return Ok(());
        }
    };

    bot.send_message(chat_id, summary)
        .parse_mode(ParseMode::Html)
        .await?;

    let reward_label = services.progress_service.reward_label();
    for session in &pending {
        bot.send_message(
            chat_id,
            format!("Confirm reward for session: {}", short_id(&session.session_id)),
        )
        .reply_markup(confirm_keyboard(&session.session_id, reward_label))
        .await?;
    }

    info!(chat_id = ?chat_id, count = pending.len(), "Listed pending rewards");
    Ok(())
}
