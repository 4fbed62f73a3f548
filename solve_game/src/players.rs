use crate::board::{Board, Move};
use crate::config::BOARD_SIZE;
use crate::error::MoveError;
use crate::search;
use anyhow::{bail, Context};
use std::io::{self, BufRead, Write};
use tracing::{debug, instrument};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mark {
    Cross,
    Nought,
}

impl Mark {
    pub const HUMAN: Mark = Mark::Cross;
    pub const COMPUTER: Mark = Mark::Nought;

    pub fn other(self) -> Self {
        match self {
            Self::Cross => Mark::Nought,
            Self::Nought => Mark::Cross,
        }
    }
    pub fn as_char(self) -> char {
        match self {
            Self::Cross => 'X',
            Self::Nought => 'O',
        }
    }
}

/// Something that picks moves for one side of the board.
pub trait Player {
    fn name(&self) -> &str;
    fn mark(&self) -> Mark;
    /// `Ok(None)` when the board has no empty cell left.
    fn choose_move(&mut self, board: &Board) -> anyhow::Result<Option<Move>>;
}

/// Reads `row column` lines until one names an empty cell.
#[derive(Debug)]
pub struct HumanPlayer<R, W> {
    pub name: String,
    input: R,
    output: W,
}

impl HumanPlayer<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(name: String) -> Self {
        HumanPlayer::new(name, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: String, input: R, output: W) -> Self {
        HumanPlayer { name, input, output }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }
    fn mark(&self) -> Mark {
        Mark::HUMAN
    }
    fn choose_move(&mut self, board: &Board) -> anyhow::Result<Option<Move>> {
        if board.available_moves().is_empty() {
            return Ok(None);
        }
        loop {
            write!(self.output, "Enter your move (row and column): ")?;
            self.output.flush()?;
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("reading the human move")?;
            if read == 0 {
                bail!("input closed before {} made a move", self.name);
            }
            match parse_move(&line, board) {
                Ok(mv) => return Ok(Some(mv)),
                Err(err) => {
                    debug!(%err, input = line.trim(), "rejected human move");
                    writeln!(self.output, "Invalid move, try again. ({err})")?;
                }
            }
        }
    }
}

/// Parses `row column` (whitespace or comma separated) and checks it against `board`.
pub fn parse_move(line: &str, board: &Board) -> Result<Move, MoveError> {
    let malformed = || MoveError::Malformed {
        input: line.trim().to_owned(),
    };
    let numbers = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<usize>().map_err(|_| malformed()))
        .collect::<Result<Vec<usize>, MoveError>>()?;
    let &[row, col] = numbers.as_slice() else {
        return Err(malformed());
    };
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(MoveError::OutOfRange { row, col });
    }
    let mv = Move::new(row, col);
    if !board.is_empty_at(mv) {
        return Err(MoveError::Occupied(mv));
    }
    Ok(mv)
}

/// The computer side: always plays the move found by the full game-tree search.
#[derive(Debug)]
pub struct MinimaxPlayer {
    pub name: String,
}

impl MinimaxPlayer {
    pub fn new(name: String) -> Self {
        MinimaxPlayer { name }
    }
}

impl Player for MinimaxPlayer {
    fn name(&self) -> &str {
        &self.name
    }
    fn mark(&self) -> Mark {
        Mark::COMPUTER
    }
    #[instrument(skip_all, fields(board = %board.key()))]
    fn choose_move(&mut self, board: &Board) -> anyhow::Result<Option<Move>> {
        let analysis = search::analyze(board);
        if let Some(mv) = analysis.best_move {
            debug!(%mv, score = analysis.score, "computer move chosen");
        }
        Ok(analysis.best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn is_marks_working() {
        assert_eq!(Mark::Cross.other(), Mark::Nought);
        assert_eq!(Mark::HUMAN.other(), Mark::COMPUTER);
        assert_eq!(Mark::Cross.as_char(), 'X');
        assert_eq!(Mark::Nought.as_char(), 'O');
    }

    #[test]
    fn parse_move_accepts_spaces_and_commas() {
        let board = Board::new();
        assert_eq!(parse_move("1 2\n", &board), Ok(Move::new(1, 2)));
        assert_eq!(parse_move("  0,0 ", &board), Ok(Move::new(0, 0)));
        assert_eq!(parse_move("2, 1", &board), Ok(Move::new(2, 1)));
    }

    #[test]
    fn parse_move_rejects_bad_input() {
        let board: Board = "X--/---/---".parse().unwrap();
        assert!(matches!(parse_move("one two", &board), Err(MoveError::Malformed { .. })));
        assert!(matches!(parse_move("1", &board), Err(MoveError::Malformed { .. })));
        assert!(matches!(parse_move("1 1 1", &board), Err(MoveError::Malformed { .. })));
        assert!(matches!(parse_move("-1 0", &board), Err(MoveError::Malformed { .. })));
        assert_eq!(
            parse_move("3 0", &board),
            Err(MoveError::OutOfRange { row: 3, col: 0 })
        );
        assert_eq!(
            parse_move("0 0", &board),
            Err(MoveError::Occupied(Move::new(0, 0)))
        );
    }

    #[test]
    fn human_player_retries_until_valid() {
        let board: Board = "X--/-O-/---".parse().unwrap();
        let input = Cursor::new("banana\n1 1\n5 5\n2 2\n");
        let mut output = Vec::new();
        let mut human = HumanPlayer::new("Tester".to_owned(), input, &mut output);
        let mv = human.choose_move(&board).unwrap();
        assert_eq!(mv, Some(Move::new(2, 2)));
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("Invalid move, try again.").count(), 3);
        assert!(printed.contains("(1, 1) is already taken"));
    }

    #[test]
    fn human_player_fails_on_closed_input() {
        let board = Board::new();
        let mut human = HumanPlayer::new("Tester".to_owned(), Cursor::new(""), io::sink());
        assert!(human.choose_move(&board).is_err());
    }

    #[test]
    fn full_board_has_no_move_for_either_side() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        let mut human = HumanPlayer::new("Tester".to_owned(), Cursor::new(""), io::sink());
        assert_eq!(human.choose_move(&board).unwrap(), None);
        let mut computer = MinimaxPlayer::new("AI".to_owned());
        assert_eq!(computer.choose_move(&board).unwrap(), None);
    }

    #[test]
    fn minimax_player_blocks_a_threat() {
        let board: Board = "XX-/-O-/---".parse().unwrap();
        let mut computer = MinimaxPlayer::new("AI".to_owned());
        assert_eq!(computer.choose_move(&board).unwrap(), Some(Move::new(0, 2)));
    }
}
