//! Session store abstraction
//!
//! Every mutation goes through [`SessionStore::save`], which only succeeds when
//! the stored version still equals the version the caller read. This gives the
//! service a compare-and-swap per session without holding locks across awaits.

use async_trait::async_trait;
use crate::models::{RewardStatus, Session};
use crate::utils::errors::Result;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a session by id
    async fn find(&self, session_id: &str) -> Result<Option<Session>>;

    /// Create a default session unless one exists; either way return the stored record
    async fn create_if_absent(&self, session_id: &str) -> Result<Session>;

    /// Persist `session` if the stored version equals `session.version`.
    ///
    /// Returns the stored session with its new version, or
    /// `GiftError::StaleVersion` when another writer got there first.
    async fn save(&self, session: &Session) -> Result<Session>;

    /// All sessions currently in `status`, oldest update first
    async fn list_by_status(&self, status: RewardStatus) -> Result<Vec<Session>>;
}
