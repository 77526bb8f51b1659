//! Chess engine components
//!
//! - Move generation from precomputed attack tables
//! - Static evaluation
//! - Minimax search with alpha-beta pruning
//! - Perft node counting

pub mod eval;
pub mod movegen;
pub mod perft;
pub mod search;

pub use eval::evaluate;
pub use movegen::{
    MoveGen, apply_move, is_checkmate, is_in_check, is_stalemate, legal_moves, pseudo_legal_moves, resolve_move,
};
pub use perft::{perft, perft_divide};
pub use search::{MATE_SCORE, SearchResult, Searcher, best_move};
