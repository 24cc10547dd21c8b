//! Error handling for BirthdayGift
//!
//! This module defines the main error type used throughout the application.
//! Domain errors (ordering, transitions, missing sessions) are kept apart from
//! infrastructure errors so that callers can map them to client responses.

use thiserror::Error;
use crate::models::{GameId, RewardStatus};

/// Main error type for BirthdayGift application
#[derive(Error, Debug)]
pub enum GiftError {
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("Must complete {missing} before {game}")]
    OutOfOrderCompletion { game: GameId, missing: GameId },

    #[error("Invalid reward transition: {from} -> {to}")]
    InvalidTransition { from: RewardStatus, to: RewardStatus },

    #[error("Notification failed: {0}")]
    NotificationFailure(String),

    #[error("Stale write for session {session_id}: expected version {expected}")]
    StaleVersion { session_id: String, expected: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for BirthdayGift operations
pub type Result<T> = std::result::Result<T, GiftError>;

impl GiftError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            GiftError::SessionNotFound { .. } => true,
            GiftError::OutOfOrderCompletion { .. } => true,
            GiftError::InvalidTransition { .. } => true,
            GiftError::NotificationFailure(_) => true,
            GiftError::StaleVersion { .. } => true,
            GiftError::Database(_) => false,
            GiftError::Migration(_) => false,
            GiftError::Telegram(_) => true,
            GiftError::Redis(_) => true,
            GiftError::Serialization(_) => false,
            GiftError::Io(_) => true,
            GiftError::UrlParse(_) => false,
            GiftError::Config(_) => false,
            GiftError::InvalidInput(_) => true,
        }
    }

    /// Whether the error was caused by the caller's input rather than the system.
    ///
    /// Transport bindings map these to a 4xx-style response.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GiftError::SessionNotFound { .. }
                | GiftError::OutOfOrderCompletion { .. }
                | GiftError::InvalidTransition { .. }
                | GiftError::InvalidInput(_)
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GiftError::Database(_) => ErrorSeverity::Critical,
            GiftError::Migration(_) => ErrorSeverity::Critical,
            GiftError::Config(_) => ErrorSeverity::Critical,
            GiftError::SessionNotFound { .. } => ErrorSeverity::Info,
            GiftError::OutOfOrderCompletion { .. } => ErrorSeverity::Info,
            GiftError::InvalidInput(_) => ErrorSeverity::Info,
            GiftError::InvalidTransition { .. } => ErrorSeverity::Warning,
            GiftError::NotificationFailure(_) => ErrorSeverity::Warning,
            GiftError::StaleVersion { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
