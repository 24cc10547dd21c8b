//! Progress service implementation
//!
//! Ties the session store, the state machine and the admin notifier together
//! for every inbound request: progress queries, game completions and reward
//! confirmations.
//!
//! Each mutation is read-modify-CAS: the session is read, the transition is
//! applied in memory and the result is saved with a version check. On a
//! version conflict the whole step is repeated against the fresh record, so
//! the notifier fires only for the write that actually committed the
//! LOCKED -> PENDING_CONFIRMATION transition.

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info, warn};
use crate::config::ProgressConfig;
use crate::database::SessionStore;
use crate::models::{GameId, ProgressView, RewardStatus, RewardStatusView, Session};
use crate::services::notification::Notifier;
use crate::state::machine;
use crate::utils::errors::{GiftError, Result};
use crate::utils::helpers::{callback_key, generate_uuid};
use crate::utils::logging;

/// Session access façade
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    config: ProgressConfig,
}

impl ProgressService {
    /// Create a new ProgressService instance
    pub fn new(store: Arc<dyn SessionStore>, notifier: Arc<dyn Notifier>, config: ProgressConfig) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Reward label shown to players and admins
    pub fn reward_label(&self) -> &str {
        &self.config.reward_label
    }

    /// Generate a new unique session ID
    pub fn generate_session_id(&self) -> String {
        generate_uuid()
    }

    /// Issue a fresh session for a client that has none yet
    pub async fn start_session(&self) -> Result<Session> {
        let session_id = self.generate_session_id();
        info!(session_id = %session_id, "Starting new session");
        self.get_or_create(&session_id).await
    }

    /// Get the session for `session_id`, creating and persisting it when unknown
    pub async fn get_or_create(&self, session_id: &str) -> Result<Session> {
        check_session_id(session_id)?;

        if let Some(session) = self.store.find(session_id).await? {
            return Ok(session);
        }
        self.store.create_if_absent(session_id).await
    }

    /// Full progress of a session; unknown ids get a new session
    pub async fn get_progress(&self, session_id: &str) -> Result<Session> {
        self.get_or_create(session_id).await
    }

    /// Record a completed game.
    ///
    /// Re-completing a recorded game returns the unchanged session.
    pub async fn complete_game(&self, session_id: &str, game: GameId) -> Result<Session> {
        let mut expected = 0;

        for attempt in 1..=self.config.max_save_attempts {
            let mut session = self.get_or_create(session_id).await?;
            expected = session.version;

            let outcome = machine::complete_game(&mut session, game, Utc::now())?;
            if !outcome.changed() {
                debug!(session_id = session_id, game = %game, "Game already completed");
                return Ok(session);
            }

            match self.store.save(&session).await {
                Ok(saved) => {
                    logging::log_game_completion(session_id, game.as_str(), saved.completed_games.len());
                    if outcome.unlocked() {
                        logging::log_session_transition(
                            session_id,
                            RewardStatus::Locked,
                            RewardStatus::PendingConfirmation,
                        );
                        self.dispatch_notification(session_id);
                    }
                    return Ok(saved);
                }
                Err(GiftError::StaleVersion { .. }) => {
                    debug!(session_id = session_id, attempt = attempt, "Version conflict on completion, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(session_id = session_id, game = %game, "Giving up on completion after repeated version conflicts");
        Err(GiftError::StaleVersion {
            session_id: session_id.to_string(),
            expected,
        })
    }

    /// Confirm that the reward was sent. Never creates a session.
    pub async fn confirm_reward(&self, session_id: &str) -> Result<Session> {
        check_session_id(session_id)?;
        let mut expected = 0;

        for attempt in 1..=self.config.max_save_attempts {
            let mut session = self
                .store
                .find(session_id)
                .await?
                .ok_or_else(|| GiftError::SessionNotFound { session_id: session_id.to_string() })?;
            expected = session.version;

            machine::confirm_reward(&mut session, Utc::now())?;

            match self.store.save(&session).await {
                Ok(saved) => {
                    logging::log_session_transition(
                        session_id,
                        RewardStatus::PendingConfirmation,
                        RewardStatus::Confirmed,
                    );
                    return Ok(saved);
                }
                Err(GiftError::StaleVersion { .. }) => {
                    debug!(session_id = session_id, attempt = attempt, "Version conflict on confirmation, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(GiftError::StaleVersion {
            session_id: session_id.to_string(),
            expected,
        })
    }

    /// Confirm the pending reward whose session maps to `key` (see [`callback_key`])
    pub async fn confirm_reward_by_key(&self, key: &str) -> Result<Session> {
        let session_id = self
            .list_pending()
            .await?
            .into_iter()
            .map(|s| s.session_id)
            .find(|id| callback_key(id) == key)
            .ok_or_else(|| GiftError::InvalidInput("No pending reward matches this button".to_string()))?;

        self.confirm_reward(&session_id).await
    }

    /// Reward status of a session; LOCKED for unknown ids, nothing is created
    pub async fn get_reward_status(&self, session_id: &str) -> Result<RewardStatus> {
        check_session_id(session_id)?;

        Ok(self
            .store
            .find(session_id)
            .await?
            .map(|s| s.reward_status)
            .unwrap_or_default())
    }

    /// Reward status with the message shown to the player
    pub async fn reward_status_view(&self, session_id: &str) -> Result<RewardStatusView> {
        let status = self.get_reward_status(session_id).await?;
        Ok(RewardStatusView::new(session_id, status, &self.config.reward_label))
    }

    /// Read-only progress view; unknown ids get the default view and are not stored
    pub async fn query_status(&self, session_id: &str) -> Result<ProgressView> {
        check_session_id(session_id)?;

        Ok(match self.store.find(session_id).await? {
            Some(session) => ProgressView::from_session(&session),
            None => ProgressView::empty(session_id),
        })
    }

    /// Sessions waiting for the admin to send the gift
    pub async fn list_pending(&self) -> Result<Vec<Session>> {
        self.store.list_by_status(RewardStatus::PendingConfirmation).await
    }

    fn dispatch_notification(&self, session_id: &str) {
        if let Err(e) = self.notifier.notify(session_id) {
            logging::log_notification_failure(session_id, &e);
        }
    }
}

impl std::fmt::Debug for ProgressService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn check_session_id(session_id: &str) -> Result<()> {
    if session_id.is_empty() {
        Err(GiftError::InvalidInput("Session id must not be empty".to_string()))
    } else {
        Ok(())
    }
}
