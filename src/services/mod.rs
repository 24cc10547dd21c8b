//! Services module
//!
//! This module contains business logic services

pub mod notification;
pub mod progress;
pub mod redis;
pub mod visibility;

// Re-export commonly used services
pub use notification::{Notifier, LogNotifier, TelegramNotifier};
pub use progress::ProgressService;
pub use redis::RedisService;
pub use visibility::VisibilityService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;
use teloxide::Bot;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub database: DatabaseService,
    pub progress_service: ProgressService,
    pub visibility_service: VisibilityService,
    pub redis_service: RedisService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, settings: Settings, database: DatabaseService) -> Result<Self> {
        let notifier = TelegramNotifier::new(bot, &settings.bot.admin_ids, settings.progress.reward_label.clone());
        Self::with_notifier(settings, database, Arc::new(notifier))
    }

    /// Create the services around an explicit notifier
    pub fn with_notifier(settings: Settings, database: DatabaseService, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let progress_service = ProgressService::new(
            database.sessions.clone(),
            notifier,
            settings.progress.clone(),
        );
        let redis_service = RedisService::new(settings.redis.clone())?;
        let visibility_service = VisibilityService::new(redis_service.clone());

        Ok(Self {
            settings,
            database,
            progress_service,
            visibility_service,
            redis_service,
        })
    }

    /// Whether `chat_id` belongs to a configured admin
    pub fn is_admin(&self, chat_id: i64) -> bool {
        self.settings.bot.admin_ids.contains(&chat_id)
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = self.database.health_check().await.is_ok();
        let redis_healthy = self.redis_service.health_check().await.unwrap_or(false);

        ServiceHealthStatus {
            database_healthy,
            redis_healthy,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub redis_healthy: bool,
}

impl ServiceHealthStatus {
    /// Progress tracking only needs the session store
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Session store unavailable".to_string());
        }
        if !self.redis_healthy {
            issues.push("Redis connection failed".to_string());
        }

        issues
    }
}
