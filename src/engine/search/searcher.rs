//! Searcher: root move loop and search entry points.

use std::time::Instant;
use tracing::debug;

use crate::core::board::{Board, Color};
use crate::core::moves::{Move, MoveList};
use crate::engine::movegen::legal_moves;
use crate::error::{ChessError, Result};

use super::ordering;
use super::types::{INFINITY, MAX_DEPTH, SearchResult, SearchStats};

pub struct Searcher {
    pub(super) stats: SearchStats,
}

impl Searcher {
    pub fn new() -> Self {
        Searcher { stats: SearchStats::default() }
    }

    /// Counters from the most recent search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub(super) fn order_moves(&self, board: &Board, moves: &mut MoveList) {
        ordering::order_moves(board, moves);
    }

    fn check_depth(depth: u32) -> Result<()> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(ChessError::InvalidDepth { depth, max: MAX_DEPTH });
        }
        Ok(())
    }

    /// Best move for the side to move, searching `depth` plies with
    /// alpha-beta. Among equally scored moves the first in search order wins.
    pub fn search(&mut self, board: &Board, depth: u32) -> Result<SearchResult> {
        Self::check_depth(depth)?;
        let start = Instant::now();
        self.stats = SearchStats::default();

        let mut moves = legal_moves(board);
        if moves.is_empty() {
            return Err(ChessError::NoLegalMoves);
        }
        self.order_moves(board, &mut moves);
        self.stats.nodes += 1;

        let maximizing = board.side_to_move() == Color::White;
        let (mut alpha, mut beta) = (-INFINITY, INFINITY);
        let mut best: Option<(Move, i32)> = None;

        for &mv in moves.iter() {
            let mut child = board.clone();
            child.make_move(mv);
            let score = self.alpha_beta(&child, depth - 1, 1, alpha, beta);

            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv, score));
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
            }
        }

        let (best_move, evaluation) = best.ok_or(ChessError::NoLegalMoves)?;
        let elapsed = start.elapsed();
        debug!(
            depth,
            best = %best_move,
            evaluation,
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(SearchResult { best_move, evaluation, nodes: self.stats.nodes, elapsed })
    }

    /// Exhaustive minimax value of `board` at `depth`; a position with no
    /// legal moves scores as mate or stalemate.
    pub fn minimax(&mut self, board: &Board, depth: u32) -> i32 {
        self.stats = SearchStats::default();
        self.minimax_value(board, depth, 0)
    }

    /// Alpha-beta value of `board` at `depth` with a full window
    pub fn alpha_beta_value(&mut self, board: &Board, depth: u32) -> i32 {
        self.stats = SearchStats::default();
        self.alpha_beta(board, depth, 0, -INFINITY, INFINITY)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot search with a fresh `Searcher`
pub fn best_move(board: &Board, depth: u32) -> Result<SearchResult> {
    Searcher::new().search(board, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::search::types::MATE_SCORE;

    #[test]
    fn test_depth_zero_rejected() {
        let mut searcher = Searcher::new();
        assert_eq!(
            searcher.search(&Board::startpos(), 0).unwrap_err(),
            ChessError::InvalidDepth { depth: 0, max: MAX_DEPTH }
        );
    }

    #[test]
    fn test_terminal_root_rejected() {
        let mate = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(best_move(&mate, 2).unwrap_err(), ChessError::NoLegalMoves);
    }

    #[test]
    fn test_finds_mate_in_one() {
        // back-rank mate with the rook
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let result = best_move(&board, 2).unwrap();
        assert_eq!(result.best_move.to_string(), "a1a8");
        assert_eq!(result.evaluation, MATE_SCORE - 1);
    }

    #[test]
    fn test_black_finds_mate_in_one() {
        let board = Board::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
        let result = best_move(&board, 2).unwrap();
        assert_eq!(result.best_move.to_string(), "a8a1");
        assert_eq!(result.evaluation, -(MATE_SCORE - 1));
    }

    #[test]
    fn test_nodes_include_root() {
        let result = best_move(&Board::startpos(), 1).unwrap();
        assert_eq!(result.nodes, 21);
    }
}
