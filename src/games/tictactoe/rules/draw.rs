//! Draw detection logic for tic-tac-toe.

use super::super::Board;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Outcome, Player, Position, Square, rules::evaluate};

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O
        let board = Board::from_cells("XOXOXXOXO").unwrap();
        assert!(is_full(&board));
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_not_draw_if_winner() {
        let board = Board::from_cells("XXXOO____").unwrap();
        assert_ne!(evaluate(&board), Outcome::Draw);
    }
}
