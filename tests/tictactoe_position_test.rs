//! Tests for tic-tac-toe position enum.

use tictactoe_duel::{Board, Player, Position, rules};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_row_and_column_are_row_major() {
    for pos in Position::ALL {
        assert_eq!(pos.row() * 3 + pos.column(), pos.to_index());
        assert_eq!(Position::from_row_col(pos.row(), pos.column()), Some(pos));
    }
    assert_eq!(Position::from_row_col(3, 0), None);
}

#[test]
fn test_corners_and_sides_partition_the_rim() {
    let mut rim: Vec<usize> = Position::CORNERS
        .iter()
        .chain(Position::SIDES.iter())
        .map(|p| p.to_index())
        .collect();
    rim.sort_unstable();
    assert_eq!(rim, vec![0, 1, 2, 3, 5, 6, 7, 8]);
}

#[test]
fn test_legal_moves_empty_board() {
    let board = Board::new();
    let valid = rules::legal_moves(&board);
    assert_eq!(valid.len(), 9); // All positions valid on empty board
}

#[test]
fn test_legal_moves_filters_occupied() {
    let board = Board::new()
        .with_move(Position::TopLeft, Player::X)
        .with_move(Position::Center, Player::O);

    let valid = rules::legal_moves(&board);
    assert_eq!(valid.len(), 7); // 2 occupied, 7 free
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.contains(&Position::BottomRight));
}

#[test]
fn test_from_key_or_label() {
    assert_eq!(Position::from_key_or_label("1"), Some(Position::TopLeft));
    assert_eq!(Position::from_key_or_label(" 9 "), Some(Position::BottomRight));
    assert_eq!(Position::from_key_or_label("center"), Some(Position::Center));
    assert_eq!(Position::from_key_or_label("0"), None);
    assert_eq!(Position::from_key_or_label("10"), None);
    assert_eq!(Position::from_key_or_label("middle"), None);
}
