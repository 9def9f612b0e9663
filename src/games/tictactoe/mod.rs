//! Tic-tac-toe board model, rules, and single-game state.

mod action;
mod game;
pub mod invariants;
mod outcome;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::Game;
pub use outcome::Outcome;
pub use position::Position;
pub use rules::{LINES, Line};
pub use types::{Board, BoardParseError, Player, Square};
