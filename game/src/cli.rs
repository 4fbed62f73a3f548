//! Command-line interface for the game binary.

use clap::{Parser, Subcommand};
use solve_game::board::Board;
use solve_game::config::FirstMover;

/// Tic-Tac-Toe against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "game")]
#[command(version)]
pub struct Cli {
    /// Log search details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Who places the first mark: human, computer or random
    #[arg(long, global = true, default_value_t)]
    pub first: FirstMover,

    /// Subcommand to run, `play` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the terminal
    Play,

    /// Print the computer's best move for a position as JSON
    Analyze {
        /// Nine cells in row-major order using X, O and -, e.g. `X--/-O-/--X`
        board: Board,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a_human_first_game() {
        let cli = Cli::try_parse_from(["game"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.first, FirstMover::Human);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_first_mover_after_subcommand() {
        let cli = Cli::try_parse_from(["game", "play", "--first", "computer", "-v"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Play)));
        assert_eq!(cli.first, FirstMover::Computer);
        assert!(cli.verbose);
    }

    #[test]
    fn parses_board_argument() {
        let cli = Cli::try_parse_from(["game", "analyze", "X--/-O-/--X"]).unwrap();
        match cli.command {
            Some(Command::Analyze { board }) => assert_eq!(board.key(), "X---O---X"),
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["game", "analyze", "XO"]).is_err());
        assert!(Cli::try_parse_from(["game", "--first", "nobody"]).is_err());
    }
}
