//! Static evaluation
//!
//! Scores are centipawns from White's point of view, whoever is to move.
//! Material plus three positional terms: central occupation, pawn
//! advancement and king shelter (the last only outside the endgame).

use crate::core::bitboard::Bitboard;
use crate::core::board::{Board, Color, Piece, PieceType, Square};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

const CENTER_BONUS: i32 = 10;
const ADVANCEMENT_BONUS: i32 = 5;
const KING_SHELTER: i32 = 20;

#[inline]
pub const fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

pub fn evaluate(board: &Board) -> i32 {
    let endgame = is_endgame(board);
    let mut score = 0;
    for sq in board.occupied() {
        if let Some(piece) = board.piece_at(sq) {
            let value = piece_value(piece.piece_type) + positional_bonus(piece, sq, endgame);
            match piece.color {
                Color::White => score += value,
                Color::Black => score -= value,
            }
        }
    }
    score
}

fn positional_bonus(piece: Piece, sq: Square, endgame: bool) -> i32 {
    let mut bonus = 0;
    if Bitboard::CENTER.contains(sq) {
        bonus += CENTER_BONUS;
    }
    match piece.piece_type {
        PieceType::Pawn => {
            let advanced = match piece.color {
                Color::White => sq.rank(),
                Color::Black => 7 - sq.rank(),
            };
            bonus += advanced as i32 * ADVANCEMENT_BONUS;
        }
        PieceType::King if !endgame => {
            let sheltered = sq.rank() == piece.color.back_rank() && (sq.file() <= 2 || sq.file() >= 5);
            bonus += if sheltered { KING_SHELTER } else { -KING_SHELTER };
        }
        _ => {}
    }
    bonus
}

/// At most four minor and major pieces on the board, or at most six when
/// both queens are gone
pub fn is_endgame(board: &Board) -> bool {
    let kings_and_pawns = board.pieces(PieceType::King) | board.pieces(PieceType::Pawn);
    let pieces = (board.occupied() & !kings_and_pawns).count();
    pieces <= 4 || (pieces <= 6 && board.pieces(PieceType::Queen).is_empty())
}
