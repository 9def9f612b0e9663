//! Easy opponent: a uniformly random legal move.

use super::Strategy;
use crate::games::tictactoe::{Board, Player, Position, rules};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::debug;

/// Picks uniformly among the legal moves.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a strategy seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible strategy.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn choose_move(&mut self, board: &Board, me: Player) -> Option<Position> {
        let moves = rules::legal_moves(board);
        let choice = moves.choose(&mut self.rng).copied();
        debug!(player = %me, candidates = moves.len(), ?choice, "Random move chosen");
        choice
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_returns_none_on_full_board() {
        let board = Board::from_cells("XOXXOOOXX").unwrap();
        assert_eq!(RandomStrategy::seeded(1).choose_move(&board, Player::O), None);
    }

    #[test]
    fn test_only_legal_moves() {
        let board = Board::from_cells("XOX_O_XO_").unwrap();
        let mut strategy = RandomStrategy::seeded(7);
        for _ in 0..100 {
            let pos = strategy.choose_move(&board, Player::X).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_single_legal_move_is_taken() {
        let board = Board::from_cells("XOXXOOOX_").unwrap();
        let pos = RandomStrategy::seeded(3).choose_move(&board, Player::X);
        assert_eq!(pos, Some(Position::BottomRight));
    }

    #[test]
    fn test_picks_are_roughly_uniform() {
        let board = Board::new();
        let mut strategy = RandomStrategy::seeded(42);
        let mut counts = [0usize; 9];
        for _ in 0..9_000 {
            let pos = strategy.choose_move(&board, Player::O).unwrap();
            counts[pos.to_index()] += 1;
        }
        // Expected 1000 per cell, standard deviation about 32.
        for (cell, &count) in counts.iter().enumerate() {
            assert!((850..=1150).contains(&count), "cell {cell} picked {count} times");
        }
    }

    #[test]
    fn test_uniform_over_remaining_cells() {
        let board = Board::from_cells("XO_X_O_X_").unwrap();
        let mut strategy = RandomStrategy::seeded(8);
        let mut counts: HashMap<Position, usize> = HashMap::new();
        for _ in 0..4_000 {
            *counts.entry(strategy.choose_move(&board, Player::O).unwrap()).or_default() += 1;
        }
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&n| (850..=1150).contains(&n)), "{counts:?}");
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let board = Board::new();
        let mut a = RandomStrategy::seeded(99);
        let mut b = RandomStrategy::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.choose_move(&board, Player::X), b.choose_move(&board, Player::X));
        }
    }
}
