//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so strategies and the session controller share one definition.

pub mod draw;
pub mod legal;
pub mod win;

pub use draw::is_full;
pub use legal::{is_legal, legal_moves};
pub use win::{LINES, Line, check_winner, evaluate, line_indices, winning_line};
