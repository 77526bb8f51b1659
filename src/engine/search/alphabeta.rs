//! Alpha-beta and the exhaustive minimax it must agree with.

use crate::core::board::{Board, Color};
use crate::engine::eval::evaluate;
use crate::engine::movegen::legal_moves;

use super::searcher::Searcher;
use super::types::{DRAW_SCORE, INFINITY, MATE_SCORE};

/// Score of a position with no legal moves: mate against the side to move,
/// nearer mates scoring larger, or a draw
fn terminal_score(board: &Board, ply: u32) -> i32 {
    if !board.is_check() {
        return DRAW_SCORE;
    }
    let mate = MATE_SCORE - ply as i32;
    match board.side_to_move() {
        Color::White => -mate,
        Color::Black => mate,
    }
}

impl Searcher {
    /// White maximizes, Black minimizes. Fail-soft: the returned value is
    /// exact whenever it lies strictly inside the window.
    pub(super) fn alpha_beta(&mut self, board: &Board, depth: u32, ply: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;

        if depth == 0 {
            return evaluate(board);
        }

        let mut moves = legal_moves(board);
        if moves.is_empty() {
            return terminal_score(board, ply);
        }
        self.order_moves(board, &mut moves);

        let maximizing = board.side_to_move() == Color::White;
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for &mv in moves.iter() {
            let mut child = board.clone();
            child.make_move(mv);
            let score = self.alpha_beta(&child, depth - 1, ply + 1, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        best
    }

    /// Plain minimax over every line, no pruning
    pub(super) fn minimax_value(&mut self, board: &Board, depth: u32, ply: u32) -> i32 {
        self.stats.nodes += 1;

        if depth == 0 {
            return evaluate(board);
        }

        let moves = legal_moves(board);
        if moves.is_empty() {
            return terminal_score(board, ply);
        }

        let scores = moves.iter().map(|&mv| {
            let mut child = board.clone();
            child.make_move(mv);
            self.minimax_value(&child, depth - 1, ply + 1)
        });
        let best = match board.side_to_move() {
            Color::White => scores.max(),
            Color::Black => scores.min(),
        };
        best.unwrap_or(DRAW_SCORE)
    }
}
