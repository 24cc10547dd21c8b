//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Shorten a session id for chat messages, e.g. `1b4e28ba...`
pub fn short_id(session_id: &str) -> String {
    let mut chars = session_id.chars();
    let head: String = chars.by_ref().take(8).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Longest callback key; with the `confirm:` prefix it fits the 64 byte limit
/// of Telegram callback data.
pub const CALLBACK_KEY_LEN: usize = 32;

/// Short, stable key standing in for a session id inside callback data.
///
/// Session ids are opaque and may be arbitrarily long, so inline buttons carry
/// this name-based UUID (v5) instead.
pub fn callback_key(session_id: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, session_id.as_bytes())
        .simple()
        .to_string()
}
