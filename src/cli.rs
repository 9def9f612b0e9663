//! Command-line interface for tictactoe_duel.

use clap::{Parser, Subcommand};
use tictactoe_duel::{Difficulty, Player};

/// Tic-tac-toe against the computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe_duel")]
#[command(about = "Play tic-tac-toe against an easy or hard computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Opponent strength (easy or hard)
        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,

        /// Marker that opens the first game; the human plays it
        #[arg(short, long, default_value = "X")]
        first: Player,

        /// Path to a presentation config file (TOML)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// Evaluate a board and show the hard opponent's reply
    Eval {
        /// Nine cells in row-major order, e.g. "XX_O_____" (X, O, or _ . - for empty)
        board: String,

        /// Marker the computer plays
        #[arg(long, default_value = "O")]
        ai: Player,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
