//! BirthdayGift
//!
//! Progress tracking and reward gating for a sequence of birthday mini-games.
//! This library provides the session store, the reward state machine, admin
//! notification over Telegram and the admin bot handlers that confirm rewards.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GiftError, Result};
pub use models::{GameId, RewardStatus, Session};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::{ServiceFactory, ProgressService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
