//! Application state and logic.

use crossterm::event::KeyCode;
use tictactoe_duel::{
    MoveError, PendingReply, Position, PresentationConfig, ReplyMode, SessionController, Theme,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::input::move_cursor;

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: SessionController,
    config: PresentationConfig,
    theme: Theme,
    cursor: Position,
    notice: Option<String>,
    reply_tx: mpsc::UnboundedSender<PendingReply>,
    reply_task: Option<JoinHandle<()>>,
    should_quit: bool,
}

impl App {
    /// Creates the application around a session.
    ///
    /// Deferred replies are delivered on `reply_tx` once the configured delay has passed.
    pub fn new(
        session: SessionController,
        config: PresentationConfig,
        reply_tx: mpsc::UnboundedSender<PendingReply>,
    ) -> Self {
        let mode = if config.reply_delay().is_zero() {
            ReplyMode::Immediate
        } else {
            ReplyMode::Deferred
        };
        let mut app = Self {
            session: session.reply_mode(mode),
            theme: *config.theme(),
            config,
            cursor: Position::Center,
            notice: None,
            reply_tx,
            reply_task: None,
            should_quit: false,
        };
        app.schedule_reply();
        app
    }

    /// Gets the session.
    pub fn session(&self) -> &SessionController {
        &self.session
    }

    /// Gets the presentation config.
    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    /// Gets the active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Gets the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the last transient message, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True while a computer reply is waiting on its delay.
    pub fn is_thinking(&self) -> bool {
        self.session.pending_reply().is_some()
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(pos) = Position::from_key_or_label(&c.to_string()) {
                    self.cursor = pos;
                    self.play(pos);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Char('n') => self.new_game(),
            KeyCode::Char('r') => {
                self.session.reset_scores();
                self.notice = Some("Scores reset".to_string());
            }
            KeyCode::Char('d') => {
                let difficulty = self.session.current_difficulty().toggle();
                self.session.set_difficulty(difficulty);
                self.notice = Some(format!("Difficulty: {}", difficulty));
            }
            KeyCode::Char('f') => {
                self.session.toggle_first_player();
                self.notice = Some(format!(
                    "{} will start the next game",
                    self.session.first_player()
                ));
            }
            KeyCode::Char('t') => self.theme = self.theme.toggle(),
            _ => {}
        }
    }

    /// Applies a computer reply delivered by the delay task.
    #[instrument(skip(self))]
    pub fn on_reply(&mut self, ticket: PendingReply) {
        self.reply_task = None;
        match self.session.play_pending(ticket) {
            Ok(pos) => debug!(?pos, "Computer reply applied"),
            Err(MoveError::StaleReply) => debug!("Stale computer reply ignored"),
            Err(e) => warn!(error = %e, "Computer reply failed"),
        }
    }

    /// Cancels any pending reply and starts a fresh game.
    pub fn new_game(&mut self) {
        self.cancel_reply();
        self.session.start_new_game();
        self.notice = None;
        self.schedule_reply();
    }

    fn play(&mut self, pos: Position) {
        match self.session.apply_move(pos.to_index()) {
            Ok(_) => {
                self.notice = None;
                self.schedule_reply();
            }
            Err(e) => {
                debug!(error = %e, "Move ignored");
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Spawns the delay task when the session is waiting on a deferred reply.
    fn schedule_reply(&mut self) {
        let Some(ticket) = self.session.pending_reply() else {
            return;
        };
        if self.reply_task.is_some() {
            return;
        }
        let delay = self.config.reply_delay();
        let tx = self.reply_tx.clone();
        debug!(?delay, "Scheduling computer reply");
        self.reply_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the UI is shutting down.
            let _ = tx.send(ticket);
        }));
    }

    fn cancel_reply(&mut self) {
        if let Some(task) = self.reply_task.take() {
            debug!("Cancelling pending computer reply");
            task.abort();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.cancel_reply();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_duel::{Difficulty, HeuristicStrategy, Opponents, Player, RandomStrategy, SessionPhase};

    fn hard_session() -> SessionController {
        SessionController::with_opponents(Opponents::new(
            Box::new(RandomStrategy::seeded(1)),
            Box::new(HeuristicStrategy::new()),
        ))
        .difficulty(Difficulty::Hard)
    }

    fn delayed_config() -> PresentationConfig {
        PresentationConfig::default().with_overrides(Some("animations"), None)
    }

    #[tokio::test]
    async fn test_digit_key_plays_and_computer_replies() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(hard_session(), PresentationConfig::default(), tx);

        app.handle_key(KeyCode::Char('5'));
        let board = app.session().snapshot().board;
        assert_eq!(board[4], Some(Player::X));
        assert_eq!(board[0], Some(Player::O));
        assert_eq!(app.cursor(), Position::Center);
    }

    #[tokio::test]
    async fn test_settings_keys() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(hard_session(), PresentationConfig::default(), tx);

        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.session().current_difficulty(), Difficulty::Easy);
        app.handle_key(KeyCode::Char('f'));
        assert_eq!(app.session().first_player(), Player::O);
        app.handle_key(KeyCode::Char('t'));
        assert_eq!(app.theme(), Theme::Dark);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_occupied_cell_sets_notice() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(hard_session(), PresentationConfig::default(), tx);

        app.handle_key(KeyCode::Char('5'));
        let before = app.session().snapshot();
        app.handle_key(KeyCode::Char('5'));
        assert_eq!(app.session().snapshot(), before);
        assert!(app.notice().is_some());
    }

    #[tokio::test]
    async fn test_delayed_reply_arrives_over_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(hard_session(), delayed_config(), tx);

        app.handle_key(KeyCode::Char('5'));
        assert!(app.is_thinking());
        assert_eq!(app.session().phase(), SessionPhase::AwaitingComputerMove);

        let ticket = rx.recv().await.unwrap();
        app.on_reply(ticket);
        assert!(!app.is_thinking());
        assert_eq!(app.session().snapshot().board[0], Some(Player::O));
    }

    #[tokio::test]
    async fn test_new_game_cancels_delayed_reply() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(hard_session(), delayed_config(), tx);

        app.handle_key(KeyCode::Char('5'));
        app.handle_key(KeyCode::Char('n'));
        assert!(!app.is_thinking());

        tokio::time::sleep(std::time::Duration::from_millis(400)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(app.session().game().board().occupied_count(), 0);
    }
}
