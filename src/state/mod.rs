//! State management module
//!
//! This module holds the session progress and reward state machine

pub mod machine;

// Re-export commonly used state components
pub use machine::{CompletionOutcome, complete_game, confirm_reward, next_game};
