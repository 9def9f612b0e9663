//! Computer opponents.
//!
//! A [`Strategy`] picks a cell for a given marker on a given board. The session
//! controller owns one strategy per [`Difficulty`] and asks the active one for
//! a move whenever the computer is to play.

mod heuristic;
mod random;

pub use heuristic::HeuristicStrategy;
pub use random::RandomStrategy;

use crate::games::tictactoe::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Trait for computer players that can choose moves.
pub trait Strategy: Send + std::fmt::Debug {
    /// Picks a cell for `me` to play, or `None` when nothing is legal.
    fn choose_move(&mut self, board: &Board, me: Player) -> Option<Position>;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;
}

/// Difficulty tier of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random legal moves.
    #[default]
    Easy,
    /// Win, block, center, corner, side.
    Hard,
}

impl Difficulty {
    /// Toggles between `Easy` and `Hard`.
    pub fn toggle(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

/// One strategy per difficulty tier.
#[derive(Debug)]
pub struct Opponents {
    easy: Box<dyn Strategy>,
    hard: Box<dyn Strategy>,
}

impl Opponents {
    /// Bundles explicit strategies, e.g. a seeded or scripted one in tests.
    pub fn new(easy: Box<dyn Strategy>, hard: Box<dyn Strategy>) -> Self {
        Self { easy, hard }
    }

    /// Returns the strategy that plays at `difficulty`.
    #[instrument(skip(self))]
    pub fn for_difficulty(&mut self, difficulty: Difficulty) -> &mut dyn Strategy {
        match difficulty {
            Difficulty::Easy => self.easy.as_mut(),
            Difficulty::Hard => self.hard.as_mut(),
        }
    }
}

impl Default for Opponents {
    fn default() -> Self {
        Self::new(
            Box::new(RandomStrategy::new()),
            Box::new(HeuristicStrategy::new()),
        )
    }
}
