//! Move ordering: MVV-LVA captures, then promotions, then quiet moves.

use crate::core::board::{Board, PieceType};
use crate::core::moves::{Move, MoveList};
use crate::engine::eval::piece_value;

const CAPTURE_BASE: i32 = 1_000_000;
const PROMOTION_BASE: i32 = 500_000;

/// Sort in place, best first. The sort is stable, so equal scores keep
/// generation order.
pub(super) fn order_moves(board: &Board, moves: &mut MoveList) {
    moves.as_mut_slice().sort_by_key(|mv| -score_move(board, mv));
}

fn score_move(board: &Board, mv: &Move) -> i32 {
    if mv.is_capture() {
        CAPTURE_BASE + mvv_lva(board, mv)
    } else if let Some(piece) = mv.promotion_piece() {
        PROMOTION_BASE + piece_value(piece)
    } else {
        0
    }
}

pub(super) fn mvv_lva(board: &Board, mv: &Move) -> i32 {
    // en passant lands on an empty square
    let victim = if mv.is_en_passant() {
        piece_value(PieceType::Pawn)
    } else {
        board.piece_at(mv.to()).map(|p| piece_value(p.piece_type)).unwrap_or(0)
    };
    let attacker = board.piece_at(mv.from()).map(|p| piece_value(p.piece_type)).unwrap_or(0);
    victim * 10 - attacker
}
