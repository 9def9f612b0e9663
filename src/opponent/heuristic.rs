//! Hard opponent: fixed-priority greedy heuristic.
//!
//! Priority, first match wins: complete own line, block the opponent's line,
//! center, lowest corner, lowest side, lowest legal cell. There is no fork
//! detection and no search, so a careful player can still beat it.

use super::Strategy;
use crate::games::tictactoe::{Board, Player, Position, rules};
use tracing::{debug, instrument};

/// Deterministic win > block > center > corner > side strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    /// Pure move selection; the trait method delegates here.
    #[instrument(level = "debug", skip(board))]
    pub fn select(board: &Board, me: Player) -> Option<Position> {
        let moves = rules::legal_moves(board);

        if let Some(pos) = completing_move(board, &moves, me) {
            debug!(?pos, "Taking the win");
            return Some(pos);
        }

        if let Some(pos) = completing_move(board, &moves, me.opponent()) {
            debug!(?pos, "Blocking opponent");
            return Some(pos);
        }

        if moves.contains(&Position::Center) {
            return Some(Position::Center);
        }

        let preferred = Position::CORNERS.iter().chain(Position::SIDES.iter());
        if let Some(pos) = preferred.copied().find(|pos| moves.contains(pos)) {
            return Some(pos);
        }

        moves.first().copied()
    }
}

/// First legal move (ascending) that gives `player` a complete line.
fn completing_move(board: &Board, moves: &[Position], player: Player) -> Option<Position> {
    moves.iter().copied().find(|&pos| {
        rules::evaluate(&board.with_move(pos, player)).winner() == Some(player)
    })
}

impl Strategy for HeuristicStrategy {
    fn choose_move(&mut self, board: &Board, me: Player) -> Option<Position> {
        Self::select(board, me)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }
}
