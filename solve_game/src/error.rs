//! Errors raised while reading moves and boards from text.

use crate::board::Move;
use derive_more::{Display, Error};

/// A human move that cannot be played.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum MoveError {
    #[display("expected `row column`, got {input:?}")]
    Malformed { input: String },
    #[display("({row}, {col}) is off the board, use numbers 0 to 2")]
    OutOfRange { row: usize, col: usize },
    #[display("{_0} is already taken")]
    Occupied(#[error(not(source))] Move),
}

/// Board notation that does not describe a 3x3 grid.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum BoardError {
    #[display("expected 9 cells, found {found}")]
    Length { found: usize },
    #[display("unknown cell {found:?}, use X, O or -")]
    InvalidCell { found: char },
}
