//! Alternating turn invariant: markers alternate from whoever opened.

use super::super::Game;
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// Consecutive history entries never share a marker, and the side to move
/// is the opponent of whoever moved last.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();

        let Some(last) = history.last() else {
            return true;
        };

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        game.to_move() == last.player.opponent()
    }

    fn description() -> &'static str {
        "Players alternate turns"
    }
}
