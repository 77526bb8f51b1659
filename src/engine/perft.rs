//! Perft: count leaf nodes of the legal move tree to validate generation.

use crate::core::board::Board;
use crate::core::moves::Move;
use crate::engine::movegen::legal_moves;

/// Leaf count at `depth`; 1 at depth 0
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&mv| {
            let mut child = board.clone();
            child.make_move(mv);
            perft(&child, depth - 1)
        })
        .sum()
}

/// Per-root-move subtotals, sorted by move text. Empty at depth 0.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut results: Vec<(Move, u64)> = legal_moves(board)
        .iter()
        .map(|&mv| {
            let mut child = board.clone();
            child.make_move(mv);
            (mv, perft(&child, depth - 1))
        })
        .collect();
    results.sort_by_cached_key(|(mv, _)| mv.to_string());
    results
}
