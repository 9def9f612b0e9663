//! Win detection and outcome evaluation for tic-tac-toe.

use super::super::{Board, Outcome, Player, Position, Square};
use tracing::instrument;

/// Three positions that win when uniformly marked.
pub type Line = [Position; 3];

/// The 8 winning lines, in scan order: rows, then columns, then diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first line (in [`LINES`] order) held entirely by one player.
///
/// A malformed board with two complete lines reports the earlier one.
pub fn winning_line(board: &Board) -> Option<(Player, Line)> {
    for line in LINES {
        let [a, b, c] = line;
        if let Square::Occupied(player) = board.get(a)
            && board.get(b) == Square::Occupied(player)
            && board.get(c) == Square::Occupied(player)
        {
            return Some((player, line));
        }
    }
    None
}

/// Checks if there is a winner on the board.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}

/// Classifies a board as won, drawn, or still in progress.
#[instrument(level = "trace", skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((player, line)) = winning_line(board) {
        return Outcome::Win { player, line };
    }
    if super::is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Converts a line to its cell indices.
pub fn line_indices(line: &Line) -> [usize; 3] {
    line.map(Position::to_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
        assert_eq!(evaluate(&board), Outcome::InProgress);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_cells("XXX_O_O__").unwrap();
        assert_eq!(
            evaluate(&board),
            Outcome::Win {
                player: Player::X,
                line: LINES[0],
            }
        );
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::from_cells("XXO_O_O_X").unwrap();
        let outcome = evaluate(&board);
        assert_eq!(outcome.winner(), Some(Player::O));
        assert_eq!(outcome.line().map(|l| line_indices(&l)), Some([2, 4, 6]));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::from_cells("XX_______").unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_double_line_reports_first_in_scan_order() {
        // Column 0 and the main diagonal are both X; rows come first, then columns.
        let board = Board::from_cells("XOOXXOXOX").unwrap();
        let outcome = evaluate(&board);
        assert_eq!(outcome.line().map(|l| line_indices(&l)), Some([0, 3, 6]));
    }

    #[test]
    fn test_row_beats_column_in_scan_order() {
        let board = Board::from_cells("XXXX__X__").unwrap();
        assert_eq!(evaluate(&board).line().map(|l| line_indices(&l)), Some([0, 1, 2]));
    }

    #[test]
    fn test_full_board_with_winner_is_win_not_draw() {
        let board = Board::from_cells("XXXOOXXOO").unwrap();
        assert_eq!(evaluate(&board).winner(), Some(Player::X));
    }
}
