mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use solve_game::board::Board;
use solve_game::config::FirstMover;
use solve_game::players::Mark;
use solve_game::search::{self, Analysis};
use std::io::{self, BufRead, Write};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(cli.first),
        Command::Analyze { board } => analyze(board),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn play(first: FirstMover) -> Result<()> {
    solve_game::play_human_minimax(first)?;
    print!("Press Enter to exit...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("waiting for Enter")?;
    Ok(())
}

#[derive(Serialize)]
struct Report {
    board: Board,
    #[serde(flatten)]
    analysis: Analysis,
}

fn analyze(board: Board) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&report(board))?);
    Ok(())
}

/// Searches `board` for the computer, warning when the position is not a normal computer turn.
fn report(board: Board) -> Report {
    let crosses = board.count(Mark::HUMAN);
    let noughts = board.count(Mark::COMPUTER);
    if crosses != noughts && crosses != noughts + 1 {
        warn!(crosses, noughts, "mark counts do not leave the computer to move");
    }
    if search::evaluate(&board).is_some() {
        warn!(board = %board.key(), "position is already decided");
    }
    let analysis = search::analyze(&board);
    Report { board, analysis }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn report_json(notation: &str) -> Value {
        let board: Board = notation.parse().unwrap();
        serde_json::to_value(report(board)).unwrap()
    }

    #[test]
    fn report_lists_board_move_score_and_stats() {
        let value = report_json("X--/-O-/--X");
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 4);
        for key in ["board", "best_move", "score", "stats"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(value["board"], json!("X---O---X"));
        assert_eq!(value["best_move"], json!({ "row": 0, "col": 1 }));
        assert_eq!(value["score"], json!(0));
        assert!(value["stats"]["visited"].as_u64().unwrap() > 0);
        assert!(value["stats"].get("cutoffs").is_some());
    }

    #[test]
    fn full_board_reports_no_move() {
        let value = report_json("XOX/XOO/OXX");
        assert_eq!(value["best_move"], Value::Null);
        assert_eq!(value["score"], Value::Null);
        assert_eq!(value["stats"]["visited"], json!(0));
    }

    #[test]
    fn decided_position_is_still_searched() {
        let value = report_json("XXX/OO-/---");
        assert_eq!(value["board"], json!("XXXOO----"));
        assert_eq!(value["best_move"], json!({ "row": 1, "col": 2 }));
        assert_eq!(value["score"], json!(1));
    }

    #[test]
    fn pretty_output_parses_back() {
        let board: Board = "---/---/---".parse().unwrap();
        let text = serde_json::to_string_pretty(&report(board)).unwrap();
        assert!(text.contains('\n'));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["best_move"], json!({ "row": 0, "col": 0 }));
    }
}
