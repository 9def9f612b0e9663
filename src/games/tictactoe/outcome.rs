//! Classification of a board snapshot.

use super::rules::Line;
use super::types::Player;
use serde::{Deserialize, Serialize};

/// Result of evaluating a board.
///
/// Computed fresh from a snapshot each time; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No winner yet and at least one empty square.
    InProgress,
    /// `player` holds all three squares of `line`.
    Win {
        /// The winning marker.
        player: Player,
        /// The completed line.
        line: Line,
    },
    /// Board is full with no winner.
    Draw,
}

impl Outcome {
    /// Returns true for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn line(&self) -> Option<Line> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win { player, .. } => write!(f, "Winner: {}", player),
            Outcome::Draw => write!(f, "It's a draw!"),
        }
    }
}
