//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the BirthdayGift application.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::models::RewardStatus;
use crate::utils::errors::{GiftError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "birthdaygift.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| GiftError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a reward status change of a session
pub fn log_session_transition(session_id: &str, from: RewardStatus, to: RewardStatus) {
    info!(
        session_id = session_id,
        from = %from,
        to = %to,
        "Reward status changed"
    );
}

/// Log game completion
pub fn log_game_completion(session_id: &str, game: &str, completed: usize) {
    debug!(
        session_id = session_id,
        game = game,
        completed = completed,
        "Game completed"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        "Admin action performed"
    );
}

/// Log a swallowed notification failure
pub fn log_notification_failure(session_id: &str, error: &GiftError) {
    warn!(
        session_id = session_id,
        error = %error,
        severity = %error.severity(),
        "Admin notification failed, transition kept"
    );
}
