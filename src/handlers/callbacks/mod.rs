//! Callback query handlers module
//!
//! This module contains handlers for the inline keyboard buttons attached to
//! reward notifications

use std::sync::Arc;
use teloxide::{Bot, types::{CallbackQuery, ChatId, ParseMode}, prelude::*};
use tracing::{info, debug, warn, error};
use crate::models::Session;
use crate::services::ServiceFactory;
use crate::services::notification::CONFIRM_CALLBACK_PREFIX;
use crate::utils::errors::{GiftError, Result};
use teloxide::utils::html;
use crate::utils::helpers::{format_timestamp, short_id};
use crate::utils::logging;

/// Parsed inline button payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Confirm button; carries the callback key of the session
    Confirm { key: String },
}

impl CallbackAction {
    /// Parse `action:argument` callback data
    pub fn parse(data: &str) -> Option<Self> {
        let (action, argument) = data.split_once(':')?;
        match action {
            CONFIRM_CALLBACK_PREFIX if !argument.is_empty() => Some(Self::Confirm {
                key: argument.to_string(),
            }),
            _ => None,
        }
    }
}

pub fn confirmed_text(session: &Session, reward_label: &str) -> String {
    let confirmed_at = session.confirmed_at.unwrap_or(session.updated_at);
    format!(
        "✅ <b>Reward Confirmed!</b>\n\n\
         Session: <code>{}</code>\n\
         Gift: {}\n\
         Confirmed at: {}",
        html::escape(&short_id(&session.session_id)),
        html::escape(reward_label),
        format_timestamp(confirmed_at)
    )
}

pub fn confirm_failed_text(error: &GiftError) -> String {
    format!("❌ Could not confirm reward: {}", html::escape(&error.to_string()))
}

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    services: Arc<ServiceFactory>,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let message = query.message.as_ref().map(|m| (m.chat().id, m.id()));

    debug!(user_id = user_id, callback_data = ?query.data, "Processing callback query");

    // Answer first to remove the loading state on the button
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };

    let Some(action) = CallbackAction::parse(data) else {
        warn!(user_id = user_id, data = %data, "Unknown callback data");
        return Ok(());
    };

    match action {
        CallbackAction::Confirm { key } => {
            let (text, failure) = match services.progress_service.confirm_reward_by_key(&key).await {
                Ok(session) => {
                    logging::log_admin_action(user_id, "confirm_reward", Some(&session.session_id));
                    info!(user_id = user_id, session_id = %session.session_id, "Reward confirmed");
                    (confirmed_text(&session, services.progress_service.reward_label()), None)
                }
                Err(e) if e.is_client_error() => {
                    warn!(user_id = user_id, key = %key, error = %e, "Reward confirmation rejected");
                    (confirm_failed_text(&e), None)
                }
                Err(e) => {
                    error!(user_id = user_id, key = %key, error = %e, severity = %e.severity(), "Reward confirmation failed");
                    (confirm_failed_text(&e), Some(e))
                }
            };

            match message {
                Some((chat_id, message_id)) => {
                    bot.edit_message_text(chat_id, message_id, text)
                        .parse_mode(ParseMode::Html)
                        .await?;
                }
                None => {
                    bot.send_message(ChatId(user_id), text)
                        .parse_mode(ParseMode::Html)
                        .await?;
                }
            }

            if let Some(e) = failure {
                return Err(e);
            }
        }
    }

    Ok(())
}
