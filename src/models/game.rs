//! Game and reward status model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::GiftError;

/// The mini-games, declared in the order they must be completed.
///
/// `Ord` follows declaration order, so sorted collections of games are in
/// sequence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameId {
    TicTacToe,
    RockPaperScissors,
    FindTheGift,
}

impl GameId {
    /// Fixed completion sequence
    pub const SEQUENCE: [GameId; 3] = [
        GameId::TicTacToe,
        GameId::RockPaperScissors,
        GameId::FindTheGift,
    ];

    /// Zero-based position in the sequence
    pub fn position(self) -> usize {
        Self::SEQUENCE
            .iter()
            .position(|g| *g == self)
            .unwrap_or(Self::SEQUENCE.len())
    }

    /// Games that must be completed before this one
    pub fn predecessors(self) -> &'static [GameId] {
        &Self::SEQUENCE[..self.position()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameId::TicTacToe => "TIC_TAC_TOE",
            GameId::RockPaperScissors => "ROCK_PAPER_SCISSORS",
            GameId::FindTheGift => "FIND_THE_GIFT",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameId {
    type Err = GiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TIC_TAC_TOE" => Ok(GameId::TicTacToe),
            "ROCK_PAPER_SCISSORS" => Ok(GameId::RockPaperScissors),
            "FIND_THE_GIFT" => Ok(GameId::FindTheGift),
            other => Err(GiftError::InvalidInput(format!("Unknown game: {}", other))),
        }
    }
}

/// Lifecycle of the reward
///
/// LOCKED - games not completed yet
/// PENDING_CONFIRMATION - all games completed, waiting for the admin to send the gift
/// CONFIRMED - gift sent and confirmed by the admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardStatus {
    Locked,
    PendingConfirmation,
    Confirmed,
}

impl RewardStatus {
    /// Only the two forward edges are legal.
    pub fn can_transition_to(self, next: RewardStatus) -> bool {
        matches!(
            (self, next),
            (RewardStatus::Locked, RewardStatus::PendingConfirmation)
                | (RewardStatus::PendingConfirmation, RewardStatus::Confirmed)
        )
    }

    /// Position along the lifecycle, used to check that status never regresses
    pub fn rank(self) -> u8 {
        match self {
            RewardStatus::Locked => 0,
            RewardStatus::PendingConfirmation => 1,
            RewardStatus::Confirmed => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RewardStatus::Locked => "LOCKED",
            RewardStatus::PendingConfirmation => "PENDING_CONFIRMATION",
            RewardStatus::Confirmed => "CONFIRMED",
        }
    }
}

impl Default for RewardStatus {
    fn default() -> Self {
        RewardStatus::Locked
    }
}

impl fmt::Display for RewardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardStatus {
    type Err = GiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOCKED" => Ok(RewardStatus::Locked),
            "PENDING_CONFIRMATION" => Ok(RewardStatus::PendingConfirmation),
            "CONFIRMED" => Ok(RewardStatus::Confirmed),
            other => Err(GiftError::InvalidInput(format!("Unknown reward status: {}", other))),
        }
    }
}
