//! Core chess types
//!
//! - Bitboard sets of squares
//! - Board state and position
//! - Moves and move requests
//! - FEN import and export
//! - Zobrist hashing
//! - Games with history and status

pub mod bitboard;
pub mod board;
pub mod fen;
pub mod game;
pub mod moves;
pub mod zobrist;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, CastlingRights, Color, Piece, PieceType, START_FEN, Square};
pub use game::{DrawReason, Game, GameStatus};
pub use moves::{Move, MoveKind, MoveList, MoveRequest};
pub use zobrist::ZobristKeys;
