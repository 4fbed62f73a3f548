//! Game-tree search for the computer's side.
//!
//! The search is exhaustive: every line is followed to a win or a full
//! board, with alpha-beta cutoffs skipping branches that cannot change the
//! result. Scores are from the computer's point of view and carry no depth
//! adjustment, so a slow win scores the same as a fast one and ties go to the
//! first move in row-major order.

use crate::board::{Board, Move};
use crate::config::{COMPUTER_WIN_SCORE, DRAW_SCORE, HUMAN_WIN_SCORE};
use crate::players::Mark;
use serde::Serialize;
use tracing::debug;

/// Counters collected while searching one position.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SearchStats {
    /// Nodes entered by the recursive search, terminal or not.
    pub visited: u64,
    /// Terminal positions scored.
    pub evaluated: u64,
    /// Nodes whose remaining moves were skipped by an alpha-beta cutoff.
    pub cutoffs: u64,
    /// Deepest ply reached below the root move.
    pub max_depth: u32,
}

/// Result of searching a position where the computer is to move.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    /// `None` when the board has no empty cell.
    pub best_move: Option<Move>,
    pub score: Option<i32>,
    pub stats: SearchStats,
}

/// Scores a finished game: computer win, human win, then full board.
/// `None` while the game is still open.
pub fn evaluate(board: &Board) -> Option<i32> {
    if board.has_won(Mark::COMPUTER) {
        Some(COMPUTER_WIN_SCORE)
    } else if board.has_won(Mark::HUMAN) {
        Some(HUMAN_WIN_SCORE)
    } else if board.is_draw() {
        Some(DRAW_SCORE)
    } else {
        None
    }
}

/// The computer's optimal move, or `None` on a full board. `board` is never modified.
pub fn best_move(board: &Board) -> Option<Move> {
    analyze(board).best_move
}

/// Searches every computer move on `board` and keeps the first one with the highest score.
pub fn analyze(board: &Board) -> Analysis {
    let mut search = Search::new(board);
    let mut best: Option<(Move, i32)> = None;
    for mv in board.available_moves() {
        search.board.apply_move(mv, Mark::COMPUTER);
        let score = search.minimax(0, false, i32::MIN, i32::MAX);
        search.board.undo_move(mv);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }
    let stats = search.stats;
    debug!(
        board = %board.key(),
        visited = stats.visited,
        evaluated = stats.evaluated,
        cutoffs = stats.cutoffs,
        max_depth = stats.max_depth,
        "search finished"
    );
    Analysis {
        best_move: best.map(|(mv, _)| mv),
        score: best.map(|(_, score)| score),
        stats,
    }
}

/// A private working copy of the board, explored by apply/undo.
struct Search {
    board: Board,
    stats: SearchStats,
}

impl Search {
    fn new(board: &Board) -> Self {
        Search {
            board: board.clone(),
            stats: SearchStats::default(),
        }
    }

    fn minimax(&mut self, depth: u32, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.visited += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if let Some(score) = evaluate(&self.board) {
            self.stats.evaluated += 1;
            return score;
        }
        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in self.board.available_moves() {
                self.board.apply_move(mv, Mark::COMPUTER);
                let eval = self.minimax(depth + 1, false, alpha, beta);
                self.board.undo_move(mv);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in self.board.available_moves() {
                self.board.apply_move(mv, Mark::HUMAN);
                let eval = self.minimax(depth + 1, true, alpha, beta);
                self.board.undo_move(mv);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            min_eval
        }
    }
}
