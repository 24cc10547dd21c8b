//! Bot handlers module
//!
//! This module contains the Telegram handlers of the admin bot:
//! - Command handlers for bot commands
//! - Callback handlers for the reward confirmation buttons

pub mod commands;
pub mod callbacks;

// Re-export commonly used handler functions
pub use commands::{Command, handle_command};
pub use callbacks::handle_callback_query;
