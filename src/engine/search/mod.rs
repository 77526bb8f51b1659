//! Search: minimax with alpha-beta pruning and MVV-LVA move ordering.

mod alphabeta;
mod ordering;
mod searcher;
mod types;

pub use searcher::{Searcher, best_move};
pub use types::{DRAW_SCORE, INFINITY, MATE_SCORE, MAX_DEPTH, SearchResult, SearchStats, is_mate_score};
