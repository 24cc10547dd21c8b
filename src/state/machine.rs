//! Progress and reward state machine
//!
//! Pure transition rules over a [`Session`]. Nothing here touches storage or
//! the notifier; callers persist the mutated session and act on the returned
//! outcome.

use chrono::{DateTime, Utc};
use crate::models::{GameId, RewardStatus, Session};
use crate::utils::errors::{GiftError, Result};

/// Result of applying a game completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The game was already recorded; the session is untouched
    AlreadyCompleted,
    /// The game was recorded. `unlocked` is set when this completion moved the
    /// reward from LOCKED to PENDING_CONFIRMATION.
    Recorded { unlocked: bool },
}

impl CompletionOutcome {
    pub fn changed(self) -> bool {
        matches!(self, CompletionOutcome::Recorded { .. })
    }

    pub fn unlocked(self) -> bool {
        matches!(self, CompletionOutcome::Recorded { unlocked: true })
    }
}

/// First game of the sequence that is not completed yet
pub fn next_game(session: &Session) -> Option<GameId> {
    GameId::SEQUENCE
        .iter()
        .copied()
        .find(|g| !session.is_completed(*g))
}

/// Mark `game` as completed.
///
/// Re-completing a recorded game is a no-op. A game whose predecessor is
/// missing fails with `OutOfOrderCompletion` naming the first missing one.
pub fn complete_game(session: &mut Session, game: GameId, now: DateTime<Utc>) -> Result<CompletionOutcome> {
    if session.is_completed(game) {
        return Ok(CompletionOutcome::AlreadyCompleted);
    }

    if let Some(missing) = game
        .predecessors()
        .iter()
        .copied()
        .find(|g| !session.is_completed(*g))
    {
        return Err(GiftError::OutOfOrderCompletion { game, missing });
    }

    session.completed_games.insert(game);
    session.updated_at = now;

    let unlocked = session.all_games_completed() && session.reward_status == RewardStatus::Locked;
    if unlocked {
        transition(session, RewardStatus::PendingConfirmation, now)?;
    }

    Ok(CompletionOutcome::Recorded { unlocked })
}

/// Move a pending reward to CONFIRMED
pub fn confirm_reward(session: &mut Session, now: DateTime<Utc>) -> Result<()> {
    transition(session, RewardStatus::Confirmed, now)?;
    session.confirmed_at = Some(now);
    Ok(())
}

fn transition(session: &mut Session, to: RewardStatus, now: DateTime<Utc>) -> Result<()> {
    let from = session.reward_status;
    if !from.can_transition_to(to) {
        return Err(GiftError::InvalidTransition { from, to });
    }
    if to != RewardStatus::Locked && !session.all_games_completed() {
        return Err(GiftError::InvalidTransition { from, to });
    }

    session.reward_status = to;
    session.updated_at = now;
    Ok(())
}
