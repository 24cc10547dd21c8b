//! Command handlers module
//!
//! This module contains handlers for all admin bot commands

pub mod start;
pub mod help;
pub mod pending;
pub mod visibility;

use std::sync::Arc;
use teloxide::{Bot, types::Message, utils::command::BotCommands};
use crate::utils::errors::Result;
use crate::services::ServiceFactory;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Birthday Gift Bot commands:")]
pub enum Command {
    #[command(description = "Start the bot and show your chat ID")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Show pending rewards")]
    Pending,
    #[command(description = "Show birthday page visibility")]
    Status,
    #[command(description = "Make the birthday page visible (admin only)")]
    ShowBirthday,
    #[command(description = "Hide the birthday page (admin only)")]
    HideBirthday,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: Arc<ServiceFactory>,
) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg).await,
        Command::Help => help::handle_help(bot, msg, services.progress_service.reward_label()).await,
        Command::Pending => pending::handle_pending(bot, msg, &services).await,
        Command::Status => visibility::handle_status(bot, msg, &services).await,
        Command::ShowBirthday => visibility::handle_set_visibility(bot, msg, &services, true).await,
        Command::HideBirthday => visibility::handle_set_visibility(bot, msg, &services, false).await,
    }
}
