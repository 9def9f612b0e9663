//! Tic-tac-toe Duel - play tic-tac-toe against the computer in the terminal.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use std::path::PathBuf;
use tictactoe_duel::{
    Board, Difficulty, HeuristicStrategy, Outcome, Player, Position, PresentationConfig,
    SessionController, rules,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            difficulty,
            first,
            config,
        } => run_play(difficulty, first, config).await,
        Command::Eval { board, ai, json } => run_eval(&board, ai, json),
    }
}

/// Launch the terminal UI
async fn run_play(difficulty: Difficulty, first: Player, config: Option<PathBuf>) -> Result<()> {
    let config = PresentationConfig::load(config.as_deref()).context("Failed to load config")?;

    let mut session = SessionController::new().difficulty(difficulty);
    if session.first_player() != first {
        session.toggle_first_player();
        session.start_new_game();
    }

    tui::run_tui(session, config).await
}

/// Evaluation report for `eval`.
#[derive(Debug, Serialize)]
struct EvalReport {
    board: Board,
    outcome: Outcome,
    winning_line: Option<[usize; 3]>,
    ai: Player,
    suggestion: Option<Position>,
}

/// Print the outcome of a board and the hard opponent's move
#[instrument]
fn run_eval(cells: &str, ai: Player, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let board = Board::from_cells(cells).context("Invalid board")?;
    let outcome = rules::evaluate(&board);
    let suggestion = if outcome.is_terminal() {
        None
    } else {
        HeuristicStrategy::select(&board, ai)
    };
    debug!(%outcome, ?suggestion, "Board evaluated");

    let report = EvalReport {
        board,
        outcome,
        winning_line: outcome.line().map(|line| rules::line_indices(&line)),
        ai,
        suggestion,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}\n", report.board.display());
        println!("{}", report.outcome);
        if let Some(line) = report.winning_line {
            println!("Winning line: {:?}", line);
        }
        if let Some(pos) = report.suggestion {
            println!("{} would play {} (cell {})", ai, pos, pos.to_index() + 1);
        }
    }

    info!("Evaluation finished");
    Ok(())
}
