//! Tic-tac-toe Duel library - a human plays tic-tac-toe against the computer
//!
//! # Architecture
//!
//! - **Games**: Board model, outcome evaluation, and move legality
//! - **Opponent**: Computer strategies (random for easy, heuristic for hard)
//! - **Session**: Turn cycle, status line, scores, and settings across games
//! - **Config**: Presentation settings for the terminal front end
//!
//! # Example
//!
//! ```
//! use tictactoe_duel::{Difficulty, SessionController};
//!
//! let mut session = SessionController::new().difficulty(Difficulty::Hard);
//! session.apply_move(4).unwrap();
//! assert_eq!(session.status(), "Next player: X");
//! assert_eq!(session.game().history().len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod games;

mod config;
mod opponent;
mod session;

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, BoardParseError, Game, LINES, Line, Move, MoveError, Outcome, Player, Position,
    Square, rules,
};

// Crate-level exports - Opponents
pub use opponent::{Difficulty, HeuristicStrategy, Opponents, RandomStrategy, Strategy};

// Crate-level exports - Session management
pub use session::{
    PendingReply, ReplyMode, ScoreTally, SessionController, SessionPhase, SessionSnapshot,
};

// Crate-level exports - Presentation configuration
pub use config::{
    ConfigError, FEATURE_FLAGS_ENV, FeatureFlag, LOG_LEVEL_ENV, PresentationConfig, Theme,
    parse_flags,
};
