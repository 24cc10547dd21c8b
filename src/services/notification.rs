//! Admin notification
//!
//! The progress service signals a [`Notifier`] when a session first reaches
//! PENDING_CONFIRMATION. The Telegram implementation posts a message with a
//! confirm button to every configured admin chat.

use teloxide::{Bot, types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode}, prelude::*};
use tracing::{info, warn, error, debug};
use crate::utils::errors::{GiftError, Result};
use teloxide::utils::html;
use crate::utils::helpers::{callback_key, short_id};

/// Callback data prefix of the confirm button
pub const CONFIRM_CALLBACK_PREFIX: &str = "confirm";

/// One-way sink for "reward awaiting confirmation" events.
///
/// Implementations must return quickly and must not wait on the delivery.
pub trait Notifier: Send + Sync {
    fn notify(&self, session_id: &str) -> Result<()>;
}

/// Notifier that only records the event in the log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, session_id: &str) -> Result<()> {
        info!(session_id = session_id, "Reward pending confirmation");
        Ok(())
    }
}

/// Callback data of the confirm button, `confirm:<key>`
pub fn confirm_callback_data(session_id: &str) -> String {
    format!("{}:{}", CONFIRM_CALLBACK_PREFIX, callback_key(session_id))
}

/// Inline keyboard with the confirm button for one session
pub fn confirm_keyboard(session_id: &str, reward_label: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        format!("✅ Confirm Sent ({})", reward_label),
        confirm_callback_data(session_id),
    )]])
}

/// Text of the pending reward notification
pub fn pending_reward_text(session_id: &str, reward_label: &str) -> String {
    format!(
        "🎉 <b>New Reward Pending!</b>\n\n\
         Someone completed all birthday games!\n\n\
         Session: <code>{}</code>\n\n\
         Please send the gift ({}) and confirm below.",
        html::escape(&short_id(session_id)),
        html::escape(reward_label)
    )
}

/// Telegram notifier posting to the admin chats
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    admin_chats: Vec<ChatId>,
    reward_label: String,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, admin_ids: &[i64], reward_label: impl Into<String>) -> Self {
        Self {
            bot,
            admin_chats: admin_ids.iter().map(|&id| ChatId(id)).collect(),
            reward_label: reward_label.into(),
        }
    }

    /// Send the notification to every admin chat and wait for the results.
    ///
    /// Fails only when no admin chat received the message.
    pub async fn deliver(&self, session_id: &str) -> Result<()> {
        let text = pending_reward_text(session_id, &self.reward_label);
        let mut delivered = 0usize;
        let mut last_error = None;

        for chat_id in &self.admin_chats {
            let sent = self
                .bot
                .send_message(*chat_id, text.clone())
                .parse_mode(ParseMode::Html)
                .reply_markup(confirm_keyboard(session_id, &self.reward_label))
                .await;

            match sent {
                Ok(_) => {
                    debug!(chat_id = ?chat_id, session_id = session_id, "Pending reward notification sent");
                    delivered += 1;
                }
                Err(e) => {
                    warn!(chat_id = ?chat_id, session_id = session_id, error = %e, "Failed to notify admin chat");
                    last_error = Some(e);
                }
            }
        }

        match (delivered, last_error) {
            (0, Some(e)) => Err(GiftError::Telegram(e)),
            (0, None) => Err(GiftError::NotificationFailure("No admin chats configured".to_string())),
            _ => Ok(()),
        }
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, session_id: &str) -> Result<()> {
        if self.admin_chats.is_empty() {
            return Err(GiftError::NotificationFailure("No admin chats configured".to_string()));
        }

        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| GiftError::NotificationFailure(format!("No async runtime: {}", e)))?;

        let notifier = self.clone();
        let session_id = session_id.to_string();
        handle.spawn(async move {
            if let Err(e) = notifier.deliver(&session_id).await {
                error!(session_id = %session_id, error = %e, "Pending reward notification was not delivered");
            }
        });

        Ok(())
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("admin_chats", &self.admin_chats)
            .field("reward_label", &self.reward_label)
            .finish_non_exhaustive()
    }
}
