//! In-process session store
//!
//! Used when `database.backend = "memory"` and by the test suite.

use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use crate::models::{RewardStatus, Session};
use crate::utils::errors::{GiftError, Result};
use super::store::SessionStore;

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn create_if_absent(&self, session_id: &str) -> Result<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session_id = session_id, "Creating session");
                Session::new(session_id)
            });
        Ok(session.clone())
    }

    async fn save(&self, session: &Session) -> Result<Session> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get_mut(&session.session_id)
            .ok_or_else(|| GiftError::SessionNotFound { session_id: session.session_id.clone() })?;

        if stored.version != session.version {
            return Err(GiftError::StaleVersion {
                session_id: session.session_id.clone(),
                expected: session.version,
            });
        }

        let mut next = session.clone();
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn list_by_status(&self, status: RewardStatus) -> Result<Vec<Session>> {
        let mut matching: Vec<Session> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.reward_status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|s| s.updated_at);
        Ok(matching)
    }
}
