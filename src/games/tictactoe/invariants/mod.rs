//! Game invariants, checked by [`Game::place`](super::Game::place) in debug builds.

pub mod alternating_turn;
pub mod history_consistent;
pub mod monotonic_board;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

use derive_more::Display;

/// A property of `S` that every reachable state satisfies.
pub trait Invariant<S> {
    /// True when the property holds for `state`.
    fn holds(state: &S) -> bool;

    /// One-line statement of the property.
    fn description() -> &'static str;
}

/// Names an invariant that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Invariant violated: {}", description)]
pub struct InvariantViolation {
    /// The failed invariant's description.
    pub description: &'static str,
}

/// Several invariants checked in one pass.
pub trait InvariantSet<S> {
    /// Returns every violation, or `Ok` when all hold.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B, C> InvariantSet<S> for (A, B, C)
where
    A: Invariant<S>,
    B: Invariant<S>,
    C: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks: [(fn(&S) -> bool, &'static str); 3] = [
            (A::holds, A::description()),
            (B::holds, B::description()),
            (C::holds, C::description()),
        ];
        let violations: Vec<InvariantViolation> = checks
            .into_iter()
            .filter(|(holds, _)| !holds(state))
            .map(|(_, description)| InvariantViolation { description })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Everything [`Game::place`](super::Game::place) verifies after a move.
pub type GameInvariants = (
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Game, Player, Position, Square};

    #[test]
    fn test_fresh_and_played_games_pass() {
        assert!(GameInvariants::check_all(&Game::new(Player::X)).is_ok());
        let game = Game::replay(Player::O, &[0, 4, 2]).unwrap();
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_stray_mark_is_reported_by_name() {
        let mut game = Game::replay(Player::X, &[4]).unwrap();
        game.board.set(Position::TopLeft, Square::Occupied(Player::O));

        let violations = GameInvariants::check_all(&game).unwrap_err();
        let names: Vec<&str> = violations.iter().map(|v| v.description).collect();
        assert!(names.contains(&MonotonicBoardInvariant::description()));
        assert!(names.contains(&HistoryConsistentInvariant::description()));
        assert!(!names.contains(&AlternatingTurnInvariant::description()));
    }
}
