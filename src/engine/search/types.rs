//! Search results, stats and constants.

use crate::core::moves::Move;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    /// Centipawns from White's point of view
    pub evaluation: i32,
    /// Every visited node, root included
    pub nodes: u64,
    pub elapsed: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

pub const INFINITY: i32 = 1_000_000;
/// Score of being mated at the root; shortened by one per ply
pub const MATE_SCORE: i32 = 100_000;
pub const DRAW_SCORE: i32 = 0;
pub const MAX_DEPTH: u32 = 64;

/// True for scores that encode a forced mate
pub fn is_mate_score(score: i32) -> bool {
    score.abs() > MATE_SCORE - MAX_DEPTH as i32
}
