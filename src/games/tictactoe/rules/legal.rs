//! Legal move generation.
//!
//! Every empty square is legal today. Strategies ask this module rather than
//! the board so that a future restriction (say, no opening in the center)
//! only has to change here.

use super::super::{Board, Position};

/// Legal moves for the side to play, ascending by index.
pub fn legal_moves(board: &Board) -> Vec<Position> {
    board.available_moves()
}

/// True if `pos` is currently a legal move.
pub fn is_legal(board: &Board, pos: Position) -> bool {
    board.is_empty(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_moves_legal_on_empty_board() {
        assert_eq!(legal_moves(&Board::new()), Position::ALL.to_vec());
    }

    #[test]
    fn test_occupied_squares_are_not_legal() {
        let board = Board::from_cells("X___O____").unwrap();
        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&Position::TopLeft));
        assert!(!is_legal(&board, Position::Center));
        assert!(is_legal(&board, Position::BottomRight));
    }
}
