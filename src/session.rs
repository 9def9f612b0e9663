//! Human-vs-computer session controller.
//!
//! Owns the current [`Game`], the running score, and the opponent
//! configuration. Drives the turn state machine:
//!
//! ```text
//! AwaitingHumanMove --apply_move--> AwaitingComputerMove --reply--> AwaitingHumanMove
//!         \                                  \
//!          `-----------> Terminal <-----------'
//! ```
//!
//! Refused inputs return a [`MoveError`] and leave every observable field as it was.

use crate::games::tictactoe::{Game, MoveError, Outcome, Player, Position, rules};
use crate::opponent::{Difficulty, Opponents};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the session is in its turn cycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum SessionPhase {
    /// The human may play.
    AwaitingHumanMove,
    /// The computer is to play next.
    AwaitingComputerMove,
    /// The game is won or drawn; only a new game unlocks the board.
    Terminal,
}

/// When the computer's reply is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    /// Within the same call that handed the turn to the computer.
    #[default]
    Immediate,
    /// Later, by redeeming a [`PendingReply`] with [`SessionController::play_pending`].
    Deferred,
}

/// Ticket for a deferred computer reply.
///
/// Only valid for the exact game and ply it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingReply {
    game_id: u64,
    ply: usize,
}

/// Running tally of finished games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct ScoreTally {
    /// Games won by X.
    x: u32,
    /// Games won by O.
    o: u32,
    /// Drawn games.
    draws: u32,
}

impl ScoreTally {
    /// Counts a terminal outcome; `InProgress` is ignored.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win {
                player: Player::X, ..
            } => self.x += 1,
            Outcome::Win {
                player: Player::O, ..
            } => self.o += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Everything a presentation layer needs to draw the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Cells in row-major order.
    pub board: [Option<Player>; 9],
    /// Human-readable status line.
    pub status: String,
    /// Indices of the winning line, if any.
    pub winning_line: Option<[usize; 3]>,
    /// Score tally.
    pub scores: ScoreTally,
    /// True once the game is over.
    pub locked: bool,
    /// Active difficulty.
    pub difficulty: Difficulty,
    /// Marker that opens the next game (the human's marker).
    pub first_player: Player,
    /// Turn-cycle phase.
    pub phase: SessionPhase,
}

/// Drives one human against one computer opponent across many games.
#[derive(Debug)]
pub struct SessionController {
    game: Game,
    game_id: u64,
    human: Player,
    phase: SessionPhase,
    status: String,
    scores: ScoreTally,
    difficulty: Difficulty,
    first_player: Player,
    reply_mode: ReplyMode,
    pending: Option<PendingReply>,
    opponents: Opponents,
}

impl SessionController {
    /// Creates a session with default opponents: easy difficulty, X first, immediate replies.
    #[instrument]
    pub fn new() -> Self {
        Self::with_opponents(Opponents::default())
    }

    /// Creates a session with explicit opponent strategies.
    #[instrument(skip(opponents))]
    pub fn with_opponents(opponents: Opponents) -> Self {
        let first_player = Player::X;
        let mut session = Self {
            game: Game::new(first_player),
            game_id: 0,
            human: first_player,
            phase: SessionPhase::AwaitingHumanMove,
            status: String::new(),
            scores: ScoreTally::default(),
            difficulty: Difficulty::default(),
            first_player,
            reply_mode: ReplyMode::default(),
            pending: None,
            opponents,
        };
        session.start_new_game();
        session
    }

    /// Sets the reply mode, builder style.
    pub fn reply_mode(mut self, mode: ReplyMode) -> Self {
        self.set_reply_mode(mode);
        self
    }

    /// Sets the difficulty, builder style.
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.set_difficulty(difficulty);
        self
    }

    // ─────────────────────────────────────────────────────────────
    //  Inbound operations
    // ─────────────────────────────────────────────────────────────

    /// Plays the human's mark at `index` (0-8).
    ///
    /// In [`ReplyMode::Immediate`] the computer's answer is applied before
    /// this returns; the returned outcome reflects both moves.
    #[instrument(skip(self), fields(human = %self.human, phase = %self.phase))]
    pub fn apply_move(&mut self, index: usize) -> Result<Outcome, MoveError> {
        match self.phase {
            SessionPhase::Terminal => {
                debug!("Move refused: game is locked");
                return Err(MoveError::GameOver);
            }
            SessionPhase::AwaitingComputerMove => {
                debug!("Move refused: computer to play");
                return Err(MoveError::NotYourTurn(self.human));
            }
            SessionPhase::AwaitingHumanMove => {}
        }

        self.place(index)?;
        self.enter_computer_turn();
        Ok(self.game.outcome())
    }

    /// Applies a deferred computer reply.
    ///
    /// Tickets from an earlier game, or for a board that has moved on, are
    /// refused with [`MoveError::StaleReply`] and change nothing.
    #[instrument(skip(self))]
    pub fn play_pending(&mut self, ticket: PendingReply) -> Result<Position, MoveError> {
        if self.pending != Some(ticket) {
            debug!(?ticket, current = ?self.pending, "Discarding stale computer reply");
            return Err(MoveError::StaleReply);
        }
        let pos = self.play_computer_move()?;
        self.pending = None;
        Ok(pos)
    }

    /// Clears the board for a new game; the score tally is kept.
    #[instrument(skip(self), fields(first_player = %self.first_player))]
    pub fn start_new_game(&mut self) {
        self.game_id += 1;
        self.game = Game::new(self.first_player);
        self.human = self.first_player;
        self.pending = None;
        self.refresh_turn();
        info!(game_id = self.game_id, difficulty = %self.difficulty, "New game started");
        self.enter_computer_turn();
    }

    /// Zeroes the score tally; the board is untouched.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores.reset();
        info!("Scores reset");
    }

    /// Changes the difficulty used for subsequent computer moves.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Switches the opening marker for the next game.
    #[instrument(skip(self))]
    pub fn toggle_first_player(&mut self) {
        self.first_player = self.first_player.opponent();
        debug!(first_player = %self.first_player, "First player toggled");
    }

    /// Changes when computer replies are applied.
    ///
    /// Switching to `Immediate` while a reply is pending plays it at once.
    #[instrument(skip(self))]
    pub fn set_reply_mode(&mut self, mode: ReplyMode) {
        self.reply_mode = mode;
        self.pending = None;
        self.enter_computer_turn();
    }

    // ─────────────────────────────────────────────────────────────
    //  Outbound state
    // ─────────────────────────────────────────────────────────────

    /// Returns the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the turn-cycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True once the current game is over.
    pub fn locked(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    /// Returns the score tally.
    pub fn scores(&self) -> &ScoreTally {
        &self.scores
    }

    /// Returns the active difficulty.
    pub fn current_difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the marker that opens the next game.
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Marker the human plays in the current game.
    pub fn human(&self) -> Player {
        self.human
    }

    /// Marker the computer plays in the current game.
    pub fn computer(&self) -> Player {
        self.human.opponent()
    }

    /// Returns the current reply mode.
    pub fn current_reply_mode(&self) -> ReplyMode {
        self.reply_mode
    }

    /// Ticket for the computer's reply, when one is waiting in deferred mode.
    pub fn pending_reply(&self) -> Option<PendingReply> {
        self.pending
    }

    /// Indices of the winning line, if the game is won.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.game.outcome().line().map(|line| rules::line_indices(&line))
    }

    /// Captures the observable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: (*self.game.board().squares()).map(|square| square.player()),
            status: self.status.clone(),
            winning_line: self.winning_line(),
            scores: self.scores,
            locked: self.locked(),
            difficulty: self.difficulty,
            first_player: self.first_player,
            phase: self.phase,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Places the side-to-move's mark and updates phase, status and score.
    fn place(&mut self, index: usize) -> Result<(), MoveError> {
        let player = self.game.to_move();
        let outcome = self.game.place(index)?;
        debug!(%player, index, %outcome, "Move applied");

        if outcome.is_terminal() {
            self.scores.record(&outcome);
            info!(
                %outcome,
                x = self.scores.x,
                o = self.scores.o,
                draws = self.scores.draws,
                "Game over"
            );
        }
        self.refresh_turn();
        Ok(())
    }

    /// Recomputes phase and status from the current game.
    fn refresh_turn(&mut self) {
        let outcome = self.game.outcome();
        if outcome.is_terminal() {
            self.phase = SessionPhase::Terminal;
            self.status = outcome.to_string();
        } else {
            let next = self.game.to_move();
            self.phase = if next == self.human {
                SessionPhase::AwaitingHumanMove
            } else {
                SessionPhase::AwaitingComputerMove
            };
            self.status = format!("Next player: {}", next);
        }
    }

    /// Plays or schedules the computer's move if it is the computer's turn.
    fn enter_computer_turn(&mut self) {
        if self.phase != SessionPhase::AwaitingComputerMove {
            return;
        }
        match self.reply_mode {
            ReplyMode::Immediate => {
                if let Err(e) = self.play_computer_move() {
                    warn!(error = %e, "Computer could not move");
                }
            }
            ReplyMode::Deferred => {
                let ticket = PendingReply {
                    game_id: self.game_id,
                    ply: self.game.history().len(),
                };
                debug!(?ticket, "Computer reply deferred");
                self.pending = Some(ticket);
            }
        }
    }

    /// Asks the active strategy for a move and applies it.
    fn play_computer_move(&mut self) -> Result<Position, MoveError> {
        if self.phase != SessionPhase::AwaitingComputerMove {
            return Err(MoveError::NotYourTurn(self.computer()));
        }
        let computer = self.computer();
        let strategy = self.opponents.for_difficulty(self.difficulty);
        let choice = strategy.choose_move(self.game.board(), computer);
        debug!(strategy = strategy.name(), %computer, ?choice, "Computer chose move");

        let pos = match choice.map(|pos| self.game.validate(pos.to_index())) {
            Some(Ok(pos)) => pos,
            refused => {
                let fallback = rules::legal_moves(self.game.board())
                    .first()
                    .copied()
                    .ok_or(MoveError::NoLegalMoves)?;
                warn!(?choice, ?refused, ?fallback, "Strategy move refused, playing first legal cell");
                fallback
            }
        };
        self.place(pos.to_index())?;
        Ok(pos)
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opponent::{HeuristicStrategy, RandomStrategy};

    fn hard_session() -> SessionController {
        SessionController::with_opponents(Opponents::new(
            Box::new(RandomStrategy::seeded(5)),
            Box::new(HeuristicStrategy::new()),
        ))
        .difficulty(Difficulty::Hard)
    }

    #[test]
    fn test_initial_state() {
        let session = hard_session();
        assert_eq!(session.phase(), SessionPhase::AwaitingHumanMove);
        assert_eq!(session.status(), "Next player: X");
        assert!(!session.locked());
        assert_eq!(session.winning_line(), None);
        assert_eq!(session.human(), Player::X);
    }

    #[test]
    fn test_immediate_reply_after_human_move() {
        let mut session = hard_session();
        session.apply_move(4).unwrap();
        assert_eq!(session.game().history().len(), 2);
        assert_eq!(session.snapshot().board[0], Some(Player::O));
        assert_eq!(session.status(), "Next player: X");
        assert_eq!(session.phase(), SessionPhase::AwaitingHumanMove);
    }

    #[test]
    fn test_occupied_square_is_noop() {
        let mut session = hard_session();
        session.apply_move(4).unwrap();
        let before = session.snapshot();
        assert_eq!(
            session.apply_move(0),
            Err(MoveError::SquareOccupied(Position::TopLeft))
        );
        assert_eq!(session.apply_move(42), Err(MoveError::OutOfRange(42)));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_deferred_reply_blocks_human() {
        let mut session = hard_session().reply_mode(ReplyMode::Deferred);
        session.apply_move(4).unwrap();
        assert_eq!(session.phase(), SessionPhase::AwaitingComputerMove);
        assert_eq!(session.status(), "Next player: O");

        let before = session.snapshot();
        assert_eq!(session.apply_move(0), Err(MoveError::NotYourTurn(Player::X)));
        assert_eq!(session.snapshot(), before);

        let ticket = session.pending_reply().unwrap();
        assert_eq!(session.play_pending(ticket), Ok(Position::TopLeft));
        assert_eq!(session.pending_reply(), None);
        assert_eq!(session.phase(), SessionPhase::AwaitingHumanMove);
    }

    #[test]
    fn test_ticket_is_single_use() {
        let mut session = hard_session().reply_mode(ReplyMode::Deferred);
        session.apply_move(4).unwrap();
        let ticket = session.pending_reply().unwrap();
        session.play_pending(ticket).unwrap();
        assert_eq!(session.play_pending(ticket), Err(MoveError::StaleReply));
    }

    #[test]
    fn test_new_game_discards_pending_reply() {
        let mut session = hard_session().reply_mode(ReplyMode::Deferred);
        session.apply_move(4).unwrap();
        let ticket = session.pending_reply().unwrap();

        session.start_new_game();
        assert_eq!(session.play_pending(ticket), Err(MoveError::StaleReply));
        assert_eq!(session.game().board().occupied_count(), 0);
    }

    #[test]
    fn test_switching_to_immediate_flushes_pending() {
        let mut session = hard_session().reply_mode(ReplyMode::Deferred);
        session.apply_move(4).unwrap();
        session.set_reply_mode(ReplyMode::Immediate);
        assert_eq!(session.game().history().len(), 2);
        assert_eq!(session.pending_reply(), None);
    }

    #[test]
    fn test_toggle_first_player_applies_next_game() {
        let mut session = hard_session();
        session.apply_move(4).unwrap();
        session.toggle_first_player();
        assert_eq!(session.human(), Player::X);
        assert_eq!(session.first_player(), Player::O);
        assert_eq!(session.game().history().len(), 2);

        session.start_new_game();
        assert_eq!(session.human(), Player::O);
        assert_eq!(session.status(), "Next player: O");
        session.apply_move(4).unwrap();
        assert_eq!(session.snapshot().board[4], Some(Player::O));
        assert_eq!(session.snapshot().board[0], Some(Player::X));
    }

    #[test]
    fn test_score_tally_record() {
        let mut tally = ScoreTally::default();
        tally.record(&Outcome::Draw);
        tally.record(&Outcome::InProgress);
        tally.record(&Outcome::Win {
            player: Player::O,
            line: crate::games::tictactoe::LINES[0],
        });
        assert_eq!((*tally.x(), *tally.o(), *tally.draws()), (0, 1, 1));
        tally.reset();
        assert_eq!(tally, ScoreTally::default());
    }

    #[test]
    fn test_snapshot_serializes_markers_as_strings() {
        let mut session = hard_session();
        session.apply_move(4).unwrap();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["board"][4], "X");
        assert_eq!(json["board"][0], "O");
        assert!(json["board"][1].is_null());
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["locked"], false);
    }
}
