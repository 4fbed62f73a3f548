use crate::config::BOARD_SIZE;
use crate::error::BoardError;
use crate::players::Mark;
use itertools::Itertools;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Rows, columns and both diagonals.
pub const WIN_CONDITIONS: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
    /// Character used by the compact board notation.
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Marked(mark) => mark.as_char(),
        }
    }
    fn from_char(c: char) -> Result<Self, BoardError> {
        match c {
            '-' | '.' | '_' => Ok(Cell::Empty),
            'X' | 'x' => Ok(Cell::Marked(Mark::Cross)),
            'O' | 'o' | '0' => Ok(Cell::Marked(Mark::Nought)),
            found => Err(BoardError::InvalidCell { found }),
        }
    }
}

/// A (row, column) pair, both zero-based.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Move::new(row, col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, PartialEq)]
pub enum GameStatus {
    InPlay,
    Drawn,
    Won(Mark),
}

/// The 3x3 grid. Serialises to the compact notation, e.g. `"X-O-X----"`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    cells: Array2<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: Array::from_elem((BOARD_SIZE, BOARD_SIZE), Cell::Empty),
        }
    }

    /// Empty cells in row-major order.
    pub fn available_moves(&self) -> Vec<Move> {
        self.cells
            .indexed_iter()
            .filter(|(_index, cell)| cell.is_empty())
            .map(|(index, _)| Move::from(index))
            .collect()
    }

    pub fn has_won(&self, mark: Mark) -> bool {
        WIN_CONDITIONS.iter().any(|line| {
            line.iter()
                .all(|&(row, col)| self.cells[[row, col]] == Cell::Marked(mark))
        })
    }

    /// True once no cell is empty. A full board may still hold a win, so
    /// check `has_won` for both marks first.
    pub fn is_draw(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_empty())
    }

    pub fn status(&self) -> GameStatus {
        if self.has_won(Mark::COMPUTER) {
            GameStatus::Won(Mark::COMPUTER)
        } else if self.has_won(Mark::HUMAN) {
            GameStatus::Won(Mark::HUMAN)
        } else if self.is_draw() {
            GameStatus::Drawn
        } else {
            GameStatus::InPlay
        }
    }

    pub fn get(&self, mv: Move) -> Option<Cell> {
        self.cells.get([mv.row, mv.col]).copied()
    }

    pub fn is_empty_at(&self, mv: Move) -> bool {
        self.get(mv) == Some(Cell::Empty)
    }

    /// Places `mark` on `mv`. Callers guarantee the cell is on the board and empty.
    pub fn apply_move(&mut self, mv: Move, mark: Mark) {
        self.cells[[mv.row, mv.col]] = Cell::Marked(mark);
    }

    pub fn undo_move(&mut self, mv: Move) {
        self.cells[[mv.row, mv.col]] = Cell::Empty;
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Marked(mark))
            .count()
    }

    /// Compact row-major notation, one character per cell.
    pub fn key(&self) -> String {
        self.cells.iter().map(|cell| cell.as_char()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.rows() {
            let line = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ' ',
                    Cell::Marked(mark) => mark.as_char(),
                })
                .join("|");
            writeln!(f, "{line}")?;
            writeln!(f, "-----")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .map(Cell::from_char)
            .collect::<Result<Vec<Cell>, BoardError>>()?;
        let found = cells.len();
        let cells = Array2::from_shape_vec((BOARD_SIZE, BOARD_SIZE), cells)
            .map_err(|_| BoardError::Length { found })?;
        Ok(Board { cells })
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.key()
    }
}

impl TryFrom<String> for Board {
    type Error = BoardError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
