//! Terminal UI for tictactoe_duel.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tictactoe_duel::{PendingReply, PresentationConfig, SessionController};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use app::App;

/// Log file written while the TUI owns the terminal.
pub const LOG_FILE: &str = "tictactoe_duel.log";

/// Runs the TUI until the user quits.
pub async fn run_tui(session: SessionController, config: PresentationConfig) -> Result<()> {
    // Log to a file so tracing output doesn't corrupt the screen.
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(difficulty = %session.current_difficulty(), first = %session.first_player(), "Starting TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
    let mut app = App::new(session, config, reply_tx);

    let res = run_app(&mut terminal, &mut app, &mut reply_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    info!(scores = ?app.session().scores(), "TUI closed");
    res
}

/// Draw, deliver delayed replies, read keys.
#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    reply_rx: &mut mpsc::UnboundedReceiver<PendingReply>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        while let Ok(ticket) = reply_rx.try_recv() {
            app.on_reply(ticket);
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }

        if app.should_quit() {
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
