//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod game;
pub mod session;

// Re-export commonly used models
pub use game::{GameId, RewardStatus};
pub use session::{Session, SessionRow, ProgressView, RewardStatusView};
