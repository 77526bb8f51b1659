//! Chess board representation
//!
//! `Board` holds a 64-entry piece array plus per-type and per-color bitboards
//! kept in sync with it, and the side state (turn, castling rights, en passant
//! target and the two clocks).

use super::bitboard::Bitboard;
use super::moves::{Move, MoveKind};
use super::zobrist::ZobristKeys;
use crate::engine::movegen::MoveGen;
use std::fmt;

/// Square index 0-63, a1 = 0, h1 = 7, h8 = 63
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Square(pub(crate) u8);

#[rustfmt::skip]
impl Square {
    pub const A1: Square = Square(0);  pub const B1: Square = Square(1);  pub const C1: Square = Square(2);  pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);  pub const F1: Square = Square(5);  pub const G1: Square = Square(6);  pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);  pub const B2: Square = Square(9);  pub const C2: Square = Square(10); pub const D2: Square = Square(11);
    pub const E2: Square = Square(12); pub const F2: Square = Square(13); pub const G2: Square = Square(14); pub const H2: Square = Square(15);
    pub const A3: Square = Square(16); pub const B3: Square = Square(17); pub const C3: Square = Square(18); pub const D3: Square = Square(19);
    pub const E3: Square = Square(20); pub const F3: Square = Square(21); pub const G3: Square = Square(22); pub const H3: Square = Square(23);
    pub const A4: Square = Square(24); pub const B4: Square = Square(25); pub const C4: Square = Square(26); pub const D4: Square = Square(27);
    pub const E4: Square = Square(28); pub const F4: Square = Square(29); pub const G4: Square = Square(30); pub const H4: Square = Square(31);
    pub const A5: Square = Square(32); pub const B5: Square = Square(33); pub const C5: Square = Square(34); pub const D5: Square = Square(35);
    pub const E5: Square = Square(36); pub const F5: Square = Square(37); pub const G5: Square = Square(38); pub const H5: Square = Square(39);
    pub const A6: Square = Square(40); pub const B6: Square = Square(41); pub const C6: Square = Square(42); pub const D6: Square = Square(43);
    pub const E6: Square = Square(44); pub const F6: Square = Square(45); pub const G6: Square = Square(46); pub const H6: Square = Square(47);
    pub const A7: Square = Square(48); pub const B7: Square = Square(49); pub const C7: Square = Square(50); pub const D7: Square = Square(51);
    pub const E7: Square = Square(52); pub const F7: Square = Square(53); pub const G7: Square = Square(54); pub const H7: Square = Square(55);
    pub const A8: Square = Square(56); pub const B8: Square = Square(57); pub const C8: Square = Square(58); pub const D8: Square = Square(59);
    pub const E8: Square = Square(60); pub const F8: Square = Square(61); pub const G8: Square = Square(62); pub const H8: Square = Square(63);
}

impl Square {
    /// `None` unless `index < 64`
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Both coordinates must be below 8.
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Self {
        Square(rank * 8 + file)
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The square `df` files and `dr` ranks away, if it is on the board
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::from_file_rank(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Parse algebraic notation such as `"e4"`
    pub fn from_algebraic(s: &str) -> Option<Self> {
        match s.as_bytes() {
            [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Some(Square::from_file_rank(f - b'a', r - b'1')),
            _ => None,
        }
    }

    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{}{}", file, rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank delta of a pawn push
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Color {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Promotion choices, strongest first
    pub const PROMOTIONS: [PieceType; 4] =
        [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase letter
    pub const fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// Either case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// Uppercase for white, lowercase for black
    pub fn to_char(self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(piece_type, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The four castling flags
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: CastlingRights = CastlingRights(1);
    pub const WHITE_QUEENSIDE: CastlingRights = CastlingRights(2);
    pub const BLACK_KINGSIDE: CastlingRights = CastlingRights(4);
    pub const BLACK_QUEENSIDE: CastlingRights = CastlingRights(8);
    pub const ALL: CastlingRights = CastlingRights(0xF);

    #[inline]
    pub const fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: CastlingRights) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: CastlingRights) {
        self.0 &= !other.0;
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 0-15, used to index Zobrist keys
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub const fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Rights lost when a piece leaves or lands on `sq`
    pub const fn lost_on(sq: Square) -> Self {
        match sq {
            Square::A1 => Self::WHITE_QUEENSIDE,
            Square::H1 => Self::WHITE_KINGSIDE,
            Square::E1 => CastlingRights(Self::WHITE_KINGSIDE.0 | Self::WHITE_QUEENSIDE.0),
            Square::A8 => Self::BLACK_QUEENSIDE,
            Square::H8 => Self::BLACK_KINGSIDE,
            Square::E8 => CastlingRights(Self::BLACK_KINGSIDE.0 | Self::BLACK_QUEENSIDE.0),
            _ => Self::NONE,
        }
    }
}

impl fmt::Display for CastlingRights {
    /// FEN castling field, `-` when empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let flags = [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ];
        for (right, c) in flags {
            if self.contains(right) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A chess position
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) pieces: [Bitboard; 6],
    pub(crate) colors: [Bitboard; 2],
    pub(crate) piece_at: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Board {
    /// No pieces, White to move, no rights
    pub fn empty() -> Self {
        Board {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            piece_at: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard initial position
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        let back = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (file, piece_type) in back.into_iter().enumerate() {
            let file = file as u8;
            board.put_piece(Piece::new(piece_type, Color::White), Square::from_file_rank(file, 0));
            board.put_piece(Piece::new(PieceType::Pawn, Color::White), Square::from_file_rank(file, 1));
            board.put_piece(Piece::new(PieceType::Pawn, Color::Black), Square::from_file_rank(file, 6));
            board.put_piece(Piece::new(piece_type, Color::Black), Square::from_file_rank(file, 7));
        }
        board.castling = CastlingRights::ALL;
        board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.piece_at[sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Place a piece, replacing whatever stood on `sq`
    pub fn put_piece(&mut self, piece: Piece, sq: Square) {
        self.remove_piece(sq);
        let bb = Bitboard::from_square(sq);
        self.pieces[piece.piece_type.index()] |= bb;
        self.colors[piece.color.index()] |= bb;
        self.piece_at[sq.index()] = Some(piece);
    }

    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_at[sq.index()]?;
        let keep = !Bitboard::from_square(sq);
        self.pieces[piece.piece_type.index()] &= keep;
        self.colors[piece.color.index()] &= keep;
        self.piece_at[sq.index()] = None;
        Some(piece)
    }

    #[inline]
    pub fn pieces(&self, piece_type: PieceType) -> Bitboard {
        self.pieces[piece_type.index()]
    }

    #[inline]
    pub fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    #[inline]
    pub fn pieces_of(&self, piece_type: PieceType, color: Color) -> Bitboard {
        self.pieces[piece_type.index()] & self.colors[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// `None` for a side without a king (hand-made positions)
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_of(PieceType::King, color);
        if kings.is_empty() { None } else { Some(kings.lsb()) }
    }

    /// Pieces of `attacker` that attack `sq`
    pub fn attackers_to(&self, sq: Square, attacker: Color) -> Bitboard {
        let occupied = self.occupied();
        let diagonal = self.pieces(PieceType::Bishop) | self.pieces(PieceType::Queen);
        let straight = self.pieces(PieceType::Rook) | self.pieces(PieceType::Queen);

        // a pawn of `attacker` hits `sq` from where a pawn of the other color on `sq` would hit
        let found = (MoveGen::pawn_attacks(sq, attacker.opposite()) & self.pieces(PieceType::Pawn))
            | (MoveGen::knight_attacks(sq) & self.pieces(PieceType::Knight))
            | (MoveGen::bishop_attacks(sq, occupied) & diagonal)
            | (MoveGen::rook_attacks(sq, occupied) & straight)
            | (MoveGen::king_attacks(sq) & self.pieces(PieceType::King));
        found & self.color(attacker)
    }

    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.attackers_to(sq, by).is_not_empty()
    }

    /// Whether `color`'s king stands attacked. A missing king is never in check.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.king_square(color).is_some_and(|king| self.is_attacked(king, color.opposite()))
    }

    /// Whether the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        self.is_king_attacked(self.side_to_move)
    }

    /// Play a move produced by the move generator for this position.
    ///
    /// Nothing is validated here; use `engine::movegen::apply_move` for
    /// untrusted input. A move from an empty square is a caller bug: debug
    /// builds panic, release builds leave the board untouched.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());
        debug_assert!(self.piece_at(from).is_some(), "make_move from empty square {}", from);
        let Some(piece) = self.remove_piece(from) else {
            return;
        };

        let mut irreversible = piece.piece_type == PieceType::Pawn;
        match mv.kind() {
            MoveKind::EnPassant => {
                // the captured pawn stands beside the mover, on the target's file
                self.remove_piece(Square::from_file_rank(to.file(), from.rank()));
                irreversible = true;
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = if to.file() > from.file() {
                    (Square::from_file_rank(7, from.rank()), Square::from_file_rank(5, from.rank()))
                } else {
                    (Square::from_file_rank(0, from.rank()), Square::from_file_rank(3, from.rank()))
                };
                if let Some(rook) = self.remove_piece(rook_from) {
                    self.put_piece(rook, rook_to);
                }
            }
            _ => {}
        }
        if self.remove_piece(to).is_some() {
            irreversible = true;
        }

        let placed = match mv.promotion_piece() {
            Some(promoted) => Piece::new(promoted, us),
            None => piece,
        };
        self.put_piece(placed, to);

        self.castling.remove(CastlingRights::lost_on(from));
        self.castling.remove(CastlingRights::lost_on(to));

        self.en_passant = match mv.kind() {
            MoveKind::DoublePush => Some(Square::from_file_rank(from.file(), (from.rank() + to.rank()) / 2)),
            _ => None,
        };

        self.halfmove_clock = if irreversible { 0 } else { self.halfmove_clock + 1 };
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = us.opposite();
    }

    /// Zobrist hash of the position, computed from scratch
    pub fn zobrist_hash(&self) -> u64 {
        let keys = ZobristKeys::instance();
        let mut hash = 0u64;
        for sq in self.occupied() {
            if let Some(piece) = self.piece_at(sq) {
                hash ^= keys.piece(piece, sq);
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= keys.side_to_move();
        }
        hash ^= keys.castling(self.castling);
        if let Some(ep) = self.en_passant {
            hash ^= keys.en_passant(ep);
        }
        hash
    }

    /// K v K, K+minor v K, or bishops only, all on one square color
    pub fn is_insufficient_material(&self) -> bool {
        let heavy = self.pieces(PieceType::Pawn) | self.pieces(PieceType::Rook) | self.pieces(PieceType::Queen);
        if heavy.is_not_empty() {
            return false;
        }
        let knights = self.pieces(PieceType::Knight);
        let bishops = self.pieces(PieceType::Bishop);
        match (knights.count(), bishops.count()) {
            (0, 0) | (1, 0) | (0, 1) => true,
            (0, _) => {
                (bishops & Bitboard::LIGHT_SQUARES).is_empty() || (bishops & Bitboard::DARK_SQUARES).is_empty()
            }
            _ => false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.piece_at(Square::from_file_rank(file, rank)) {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "{}", rank + 1)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        writeln!(f)?;
        write!(f, "{} to move", self.side_to_move)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
