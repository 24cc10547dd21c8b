//! Birthday page visibility
//!
//! The admin decides when the birthday page becomes reachable. The flag is
//! kept in Redis; a missing key means the page is hidden.

use tracing::info;
use crate::services::redis::RedisService;
use crate::utils::errors::Result;

const VISIBILITY_KEY: &str = "birthday:visible";

#[derive(Clone, Debug)]
pub struct VisibilityService {
    redis: RedisService,
}

impl VisibilityService {
    pub fn new(redis: RedisService) -> Self {
        Self { redis }
    }

    /// Whether the birthday page is currently visible
    pub async fn is_visible(&self) -> Result<bool> {
        Ok(self.redis.get::<bool>(VISIBILITY_KEY).await?.unwrap_or(false))
    }

    /// Show or hide the birthday page
    pub async fn set_visible(&self, visible: bool) -> Result<()> {
        self.redis.set(VISIBILITY_KEY, &visible).await?;
        info!(visible = visible, "Birthday page visibility changed");
        Ok(())
    }
}
