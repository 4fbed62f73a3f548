use crate::board::{Board, GameStatus};
use crate::config::FirstMover;
use crate::players::{HumanPlayer, Mark, MinimaxPlayer, Player};
use anyhow::bail;
use std::io::{self, Write};
use std::mem;
use tracing::{info, warn};

pub mod board;
pub mod config;
pub mod error;
pub mod players;
pub mod search;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    HumanWon,
    ComputerWon,
    Draw,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::HumanWon => "You win!",
            Outcome::ComputerWon => "AI wins!",
            Outcome::Draw => "It's a draw!",
        }
    }
}

/// One game between two players, printing the board to `out` after every move.
pub struct Game<W> {
    pub board: Board,
    pub current_player: Box<dyn Player>,
    pub other_player: Box<dyn Player>,
    out: W,
}

impl<W: Write> Game<W> {
    pub fn new(
        human: Box<dyn Player>,
        computer: Box<dyn Player>,
        first: FirstMover,
        out: W,
    ) -> Self {
        let first = first.resolve(&mut rand::thread_rng());
        let (current_player, other_player) = match first {
            FirstMover::Computer => (computer, human),
            _ => (human, computer),
        };
        Game {
            board: Board::new(),
            current_player,
            other_player,
            out,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn swap_players(&mut self) {
        mem::swap(&mut self.current_player, &mut self.other_player);
    }

    /// Alternates turns until someone wins or the board fills up.
    pub fn play(&mut self) -> anyhow::Result<Outcome> {
        info!(first = self.current_player.name(), "game started");
        writeln!(self.out, "Welcome to Tic-Tac-Toe!")?;
        write!(self.out, "{}", self.board)?;
        let outcome = loop {
            if let Some(outcome) = self.play_turn()? {
                break outcome;
            }
        };
        writeln!(self.out, "{}", outcome.message())?;
        info!(?outcome, board = %self.board.key(), "game over");
        Ok(outcome)
    }

    /// Lets the current player move once. Returns the outcome if that move ended the game.
    pub fn play_turn(&mut self) -> anyhow::Result<Option<Outcome>> {
        let mark = self.current_player.mark();
        let Some(mv) = self.current_player.choose_move(&self.board)? else {
            warn!(player = self.current_player.name(), "no move available");
            return Ok(Some(Outcome::Draw));
        };
        if !self.board.is_empty_at(mv) {
            bail!(
                "{} chose {mv}, which is not an empty cell",
                self.current_player.name()
            );
        }
        self.board.apply_move(mv, mark);
        if mark == Mark::COMPUTER {
            writeln!(self.out, "AI moves to: {mv}")?;
        }
        write!(self.out, "{}", self.board)?;
        let outcome = match self.board.status() {
            GameStatus::InPlay => None,
            GameStatus::Drawn => Some(Outcome::Draw),
            GameStatus::Won(winner) if winner == Mark::HUMAN => Some(Outcome::HumanWon),
            GameStatus::Won(_) => Some(Outcome::ComputerWon),
        };
        if outcome.is_none() {
            self.swap_players();
        }
        Ok(outcome)
    }
}

/// Human on stdin/stdout against the minimax player.
pub fn play_human_minimax(first: FirstMover) -> anyhow::Result<Outcome> {
    let human = Box::new(HumanPlayer::stdio("Human".to_owned()));
    let computer = Box::new(MinimaxPlayer::new("Minimax".to_owned()));
    let mut game = Game::new(human, computer, first, io::stdout());
    game.play()
}
