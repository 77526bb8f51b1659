pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod protocol;

pub use crate::core::{Board, Color, DrawReason, Game, GameStatus, Move, MoveKind, MoveRequest, Piece, PieceType, Square};
pub use crate::engine::{Searcher, SearchResult, apply_move, best_move, evaluate, legal_moves, perft, perft_divide};
pub use crate::error::{ChessError, FenError, IllegalMoveReason};
