//! Single-game state: board, side to move, history and outcome.

use super::action::{Move, MoveError};
use super::invariants::{GameInvariants, InvariantSet};
use super::rules;
use super::{Board, Outcome, Player, Position, Square};
use tracing::{instrument, warn};

/// One game of tic-tac-toe from empty board to terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(super) board: Board,
    pub(super) to_move: Player,
    pub(super) history: Vec<Move>,
    pub(super) outcome: Outcome,
}

impl Game {
    /// Creates an empty game with `first_player` to move.
    pub fn new(first_player: Player) -> Self {
        Self {
            board: Board::new(),
            to_move: first_player,
            history: Vec::new(),
            outcome: Outcome::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the outcome as of the last move.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True once the outcome is a win or a draw.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Checks that `index` would be accepted, without touching the game.
    pub fn validate(&self, index: usize) -> Result<Position, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let pos = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        if !rules::is_legal(&self.board, pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        Ok(pos)
    }

    /// Places the current player's mark at `index` and re-evaluates the board.
    ///
    /// The side to move flips on every accepted move, including the last one.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn place(&mut self, index: usize) -> Result<Outcome, MoveError> {
        let pos = self.validate(index)?;
        let player = self.to_move;

        self.board.set(pos, Square::Occupied(player));
        self.history.push(Move::new(player, pos));
        self.to_move = player.opponent();
        self.outcome = rules::evaluate(&self.board);

        if cfg!(debug_assertions)
            && let Err(violations) = GameInvariants::check_all(self)
        {
            warn!(?violations, "Game invariant violated");
            debug_assert!(violations.is_empty(), "Game invariant violated");
        }

        Ok(self.outcome)
    }

    /// Replays a sequence of indices from an empty board.
    pub fn replay(first_player: Player, indices: &[usize]) -> Result<Self, MoveError> {
        let mut game = Self::new(first_player);
        for &index in indices {
            game.place(index)?;
        }
        Ok(game)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Player::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_alternates_players() {
        let mut game = Game::new(Player::X);
        game.place(4).unwrap();
        assert_eq!(game.to_move(), Player::O);
        game.place(0).unwrap();
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.history()[1], Move::new(Player::O, Position::TopLeft));
    }

    #[test]
    fn test_rejections_leave_game_untouched() {
        let mut game = Game::replay(Player::X, &[4]).unwrap();
        let before = game.clone();

        assert_eq!(game.place(4), Err(MoveError::SquareOccupied(Position::Center)));
        assert_eq!(game.place(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut game = Game::replay(Player::X, &[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(game.outcome().winner(), Some(Player::X));
        assert_eq!(game.place(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw_game() {
        let game = Game::replay(Player::X, &[0, 4, 2, 1, 3, 5, 7, 6, 8]).unwrap();
        assert_eq!(game.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_o_can_open() {
        let game = Game::replay(Player::O, &[4]).unwrap();
        assert_eq!(game.board().get(Position::Center), Square::Occupied(Player::O));
        assert_eq!(game.to_move(), Player::X);
    }
}
