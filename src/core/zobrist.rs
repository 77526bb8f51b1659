//! Zobrist keys for position identity
//!
//! Used by `Game` to detect threefold repetition. The keys come from a seeded
//! `StdRng`, so hashes are stable across runs.

use super::board::{CastlingRights, Color, Piece, Square};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;

const SEED: u64 = 0x5EED_C4E5_5B0A_7D11;

pub struct ZobristKeys {
    /// [color * 6 + piece type][square]
    pieces: [[u64; 64]; 12],
    side: u64,
    castling: [u64; 16],
    /// Per en passant file
    en_passant: [u64; 8],
}

impl ZobristKeys {
    pub fn instance() -> &'static ZobristKeys {
        static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
        KEYS.get_or_init(ZobristKeys::new)
    }

    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(SEED);

        let mut pieces = [[0u64; 64]; 12];
        for square_keys in pieces.iter_mut() {
            for key in square_keys.iter_mut() {
                *key = rng.random();
            }
        }
        let side = rng.random();
        let mut castling = [0u64; 16];
        // no rights hashes to nothing
        for key in castling.iter_mut().skip(1) {
            *key = rng.random();
        }
        let mut en_passant = [0u64; 8];
        for key in en_passant.iter_mut() {
            *key = rng.random();
        }

        ZobristKeys { pieces, side, castling, en_passant }
    }

    #[inline]
    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        let offset = if piece.color == Color::White { 0 } else { 6 };
        self.pieces[offset + piece.piece_type.index()][sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.side
    }

    #[inline]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.bits() as usize]
    }

    #[inline]
    pub fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant[sq.file() as usize]
    }
}
