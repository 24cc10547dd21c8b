//! Redis integration service implementation
//!
//! Small key/value helper over a shared Redis connection manager. Keys are
//! namespaced with the configured prefix and values are stored as JSON.

use std::sync::Arc;
use redis::{Client, AsyncCommands};
use redis::aio::ConnectionManager;
use tokio::sync::OnceCell;
use serde::{Serialize, Deserialize};
use tracing::debug;
use crate::config::RedisConfig;
use crate::utils::errors::Result;

/// Redis service for persistent flags
#[derive(Clone)]
pub struct RedisService {
    client: Client,
    /// Connected on first use and shared by all clones; reconnects on its own
    connection_manager: Arc<OnceCell<ConnectionManager>>,
    config: RedisConfig,
}

impl RedisService {
    /// Create a new RedisService instance
    pub fn new(config: RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;

        Ok(Self {
            client,
            connection_manager: Arc::new(OnceCell::new()),
            config,
        })
    }

    /// Get a handle to the shared connection manager
    async fn get_connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection_manager
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(manager.clone())
    }

    /// Full key including the configured prefix
    pub fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.config.prefix, key)
    }

    /// Set a value in Redis without expiry
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let mut conn = self.get_connection().await?;
        let serialized = serde_json::to_string(value)?;
        let full_key = self.full_key(key);

        let _: () = conn.set(&full_key, serialized).await?;

        debug!(key = %full_key, "Value set in Redis");
        Ok(())
    }

    /// Get a value from Redis
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.get_connection().await?;
        let full_key = self.full_key(key);

        let result: Option<String> = conn.get(&full_key).await?;

        match result {
            Some(data) => {
                let deserialized = serde_json::from_str::<T>(&data)?;
                debug!(key = %full_key, "Value retrieved from Redis");
                Ok(Some(deserialized))
            }
            None => {
                debug!(key = %full_key, "Key not found in Redis");
                Ok(None)
            }
        }
    }

    /// Delete a key from Redis
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let full_key = self.full_key(key);

        let deleted: i32 = conn.del(&full_key).await?;

        debug!(key = %full_key, deleted = deleted > 0, "Key deletion attempted");
        Ok(deleted > 0)
    }

    /// Health check for Redis connection
    pub async fn health_check(&self) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

impl std::fmt::Debug for RedisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisService")
            .field("prefix", &self.config.prefix)
            .field("connected", &self.connection_manager.initialized())
            .finish_non_exhaustive()
    }
}
