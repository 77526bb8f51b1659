//! Move representation
//!
//! A `Move` is only ever built by the move generator, so holding one means the
//! kind tag agrees with the position it came from. `MoveRequest` is the parsed
//! text a user typed (`e2e4`, `e7e8q`) before it is matched against the legal
//! move list.

use super::board::{PieceType, Square};
use crate::error::ChessError;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum MoveKind {
    Quiet,
    Capture,
    /// Pawn advancing two ranks from its start rank
    DoublePush,
    EnPassant,
    /// King move of two files; the rook jumps over it
    Castle,
}

/// A generated move
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
    kind: MoveKind,
}

impl Move {
    #[inline]
    pub(crate) const fn quiet(from: Square, to: Square) -> Self {
        Move { from, to, promotion: None, kind: MoveKind::Quiet }
    }

    #[inline]
    pub(crate) const fn capture(from: Square, to: Square) -> Self {
        Move { from, to, promotion: None, kind: MoveKind::Capture }
    }

    #[inline]
    pub(crate) const fn double_push(from: Square, to: Square) -> Self {
        Move { from, to, promotion: None, kind: MoveKind::DoublePush }
    }

    #[inline]
    pub(crate) const fn en_passant(from: Square, to: Square) -> Self {
        Move { from, to, promotion: None, kind: MoveKind::EnPassant }
    }

    #[inline]
    pub(crate) const fn castle(from: Square, to: Square) -> Self {
        Move { from, to, promotion: None, kind: MoveKind::Castle }
    }

    #[inline]
    pub(crate) const fn promotion(from: Square, to: Square, piece: PieceType, is_capture: bool) -> Self {
        let kind = if is_capture { MoveKind::Capture } else { MoveKind::Quiet };
        Move { from, to, promotion: Some(piece), kind }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceType> {
        self.promotion
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self.kind, MoveKind::Castle)
    }
}

impl fmt::Display for Move {
    /// Coordinate notation, promotion letter uppercase: `e2e4`, `e7e8Q`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char().to_ascii_uppercase())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self, self.kind)
    }
}

/// Move buffer. Starts with room for a typical position and grows for the
/// rare hand-made one with more moves.
#[derive(Clone)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    const INITIAL_CAPACITY: usize = 64;

    #[inline]
    pub fn new() -> Self {
        MoveList { moves: Vec::with_capacity(Self::INITIAL_CAPACITY) }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(mv)
    }

    /// Keep only the moves for which `keep` returns true, preserving order
    pub fn retain(&mut self, keep: impl FnMut(&Move) -> bool) {
        self.moves.retain(keep);
    }

    pub fn to_vec(&self) -> Vec<Move> {
        self.moves.clone()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A move as typed by a user, not yet checked against any position
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square, promotion: Option<PieceType>) -> Self {
        MoveRequest { from, to, promotion }
    }

    /// Whether `mv` is the move this request names. A promotion without a
    /// piece letter means the queen.
    pub fn matches(&self, mv: &Move) -> bool {
        if self.from != mv.from() || self.to != mv.to() {
            return false;
        }
        match (self.promotion, mv.promotion_piece()) {
            (None, None) => true,
            (None, Some(piece)) => piece == PieceType::Queen,
            (Some(wanted), Some(piece)) => wanted == piece,
            (Some(_), None) => false,
        }
    }
}

impl FromStr for MoveRequest {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidMoveFormat(s.to_string());
        let text = s.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&text[0..2].to_ascii_lowercase()).ok_or_else(invalid)?;
        let to = Square::from_algebraic(&text[2..4].to_ascii_lowercase()).ok_or_else(invalid)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceType::from_char(c) {
                Some(piece) if PieceType::PROMOTIONS.contains(&piece) => Some(piece),
                _ => return Err(invalid()),
            },
        };
        Ok(MoveRequest { from, to, promotion })
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char().to_ascii_uppercase())?;
        }
        Ok(())
    }
}
