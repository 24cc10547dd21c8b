//! Game session model

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::game::{GameId, RewardStatus};
use crate::utils::errors::{GiftError, Result};

/// A user's progress through the games and the state of their reward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub completed_games: BTreeSet<GameId>,
    pub reward_status: RewardStatus,
    /// Incremented on every successful save
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Fresh session: LOCKED with nothing completed
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            completed_games: BTreeSet::new(),
            reward_status: RewardStatus::Locked,
            version: 0,
            created_at: now,
            updated_at: now,
            confirmed_at: None,
        }
    }

    pub fn is_completed(&self, game: GameId) -> bool {
        self.completed_games.contains(&game)
    }

    pub fn all_games_completed(&self) -> bool {
        GameId::SEQUENCE.iter().all(|g| self.completed_games.contains(g))
    }
}

/// Database row of the `game_sessions` table
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub session_id: String,
    pub completed_games: Vec<String>,
    pub reward_status: String,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reward_confirmed_at: Option<DateTime<Utc>>,
}

impl TryFrom<SessionRow> for Session {
    type Error = GiftError;

    fn try_from(row: SessionRow) -> Result<Self> {
        let completed_games = row
            .completed_games
            .iter()
            .map(|g| g.parse::<GameId>())
            .collect::<Result<BTreeSet<_>>>()?;

        Ok(Self {
            session_id: row.session_id,
            completed_games,
            reward_status: row.reward_status.parse()?,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
            confirmed_at: row.reward_confirmed_at,
        })
    }
}

/// Progress snapshot returned to the game frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressView {
    pub session_id: String,
    pub tic_tac_toe_completed: bool,
    pub rock_paper_scissors_completed: bool,
    pub find_the_gift_completed: bool,
    pub completed_games: Vec<GameId>,
    pub next_game: Option<GameId>,
    pub all_games_completed: bool,
    pub reward_status: RewardStatus,
}

impl ProgressView {
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.session_id.clone(),
            tic_tac_toe_completed: session.is_completed(GameId::TicTacToe),
            rock_paper_scissors_completed: session.is_completed(GameId::RockPaperScissors),
            find_the_gift_completed: session.is_completed(GameId::FindTheGift),
            completed_games: session.completed_games.iter().copied().collect(),
            next_game: crate::state::machine::next_game(session),
            all_games_completed: session.all_games_completed(),
            reward_status: session.reward_status,
        }
    }

    /// Default view for an id that has no stored session
    pub fn empty(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            tic_tac_toe_completed: false,
            rock_paper_scissors_completed: false,
            find_the_gift_completed: false,
            completed_games: Vec::new(),
            next_game: GameId::SEQUENCE.first().copied(),
            all_games_completed: false,
            reward_status: RewardStatus::Locked,
        }
    }
}

/// Reward status with the message shown to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardStatusView {
    pub session_id: String,
    pub status: RewardStatus,
    pub message: String,
}

impl RewardStatusView {
    pub fn new(session_id: impl Into<String>, status: RewardStatus, reward_label: &str) -> Self {
        let message = match status {
            RewardStatus::Locked => "Complete all games to unlock your reward".to_string(),
            RewardStatus::PendingConfirmation => {
                "Please wait while your gift is being sent manually".to_string()
            }
            RewardStatus::Confirmed => {
                format!("Gift received! {} successfully sent. Happy Birthday!", reward_label)
            }
        };

        Self {
            session_id: session_id.into(),
            status,
            message,
        }
    }
}
