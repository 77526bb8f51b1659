//! Bitboard sets of squares
//!
//! The board keeps its 64-entry piece array as the source of truth and mirrors
//! it into bitboards so that attack detection is a handful of mask operations.
//! Bit 0 is a1, bit 7 is h1, bit 63 is h8.

use super::board::Square;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A set of squares packed into a `u64`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0u64);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);
    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    pub const DARK_SQUARES: Bitboard = Bitboard(0xAA55_AA55_AA55_AA55);
    pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55AA_55AA_55AA_55AA);

    /// d4, e4, d5, e5
    pub const CENTER: Bitboard = Bitboard(0x0000_0018_1800_0000);

    /// Wrap a raw 64-bit mask
    #[inline]
    pub const fn new(value: u64) -> Self {
        Bitboard(value)
    }

    /// The set holding only `sq`
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1u64 << sq.0)
    }

    /// True when no square is set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when at least one square is set
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Number of squares in the set
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest square in the set. Meaningless on an empty set.
    #[inline]
    pub const fn lsb(self) -> Square {
        Square(self.0.trailing_zeros() as u8)
    }

    /// Highest square in the set. Meaningless on an empty set.
    #[inline]
    pub const fn msb(self) -> Square {
        Square(63 - self.0.leading_zeros() as u8)
    }

    /// Remove and return the lowest square. The set must not be empty.
    #[inline]
    pub fn pop_lsb(&mut self) -> Square {
        let sq = self.lsb();
        self.0 &= self.0 - 1;
        sq
    }

    /// Check if a specific square is set
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.0) & 1 != 0
    }

    /// Add `sq` to the set
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.0;
    }

    /// Shift every square one rank up; rank 8 falls off
    #[inline]
    pub const fn north(self) -> Self {
        Bitboard(self.0 << 8)
    }

    /// Shift every square one rank down; rank 1 falls off
    #[inline]
    pub const fn south(self) -> Self {
        Bitboard(self.0 >> 8)
    }

    /// Shift one file toward h without wrapping onto the a-file
    #[inline]
    pub const fn east(self) -> Self {
        Bitboard((self.0 << 1) & !Self::FILE_A.0)
    }

    /// Shift one file toward a without wrapping onto the h-file
    #[inline]
    pub const fn west(self) -> Self {
        Bitboard((self.0 >> 1) & !Self::FILE_H.0)
    }

    /// Shift diagonally up and toward h
    #[inline]
    pub const fn north_east(self) -> Self {
        Bitboard((self.0 << 9) & !Self::FILE_A.0)
    }

    /// Shift diagonally up and toward a
    #[inline]
    pub const fn north_west(self) -> Self {
        Bitboard((self.0 << 7) & !Self::FILE_H.0)
    }

    /// Shift diagonally down and toward h
    #[inline]
    pub const fn south_east(self) -> Self {
        Bitboard((self.0 >> 7) & !Self::FILE_A.0)
    }

    /// Shift diagonally down and toward a
    #[inline]
    pub const fn south_west(self) -> Self {
        Bitboard((self.0 >> 9) & !Self::FILE_H.0)
    }

    /// All squares of `rank`, 0 being rank 1
    #[inline]
    pub const fn rank_mask(rank: u8) -> Self {
        Bitboard(Self::RANK_1.0 << (rank * 8))
    }

    /// Squares in ascending order
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.pop_lsb())
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> BitboardIter {
        self.iter()
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8 {
                let mark = if self.contains(Square::from_file_rank(file, rank)) { 'X' } else { '.' };
                write!(f, "{} ", mark)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")
    }
}
