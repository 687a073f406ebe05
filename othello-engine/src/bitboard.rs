//! Low-level bitboard operations.
//!
//! A [`Bitboard`] stores one bit per square of the board. By convention,
//! the MSB is the upper-left of the board, and bits run in row-major order,
//! so square `(row, col)` lives at bit `63 - (row * 8 + col)`.

use crate::{utils, NUM_SPACES};
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// Holds a single bit per location on an Othello board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bitboard(u64);

/// Starting bitboard for Black: D5 and E4.
pub const BLACK_START: Bitboard = Bitboard(0x0000000810000000);

/// Starting bitboard for White: D4 and E5.
pub const WHITE_START: Bitboard = Bitboard(0x0000001008000000);

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        utils::format_grid(
            self.into_iter().map(|bit| match bit {
                false => '.',
                true => '#',
            }),
            f,
        )
    }
}

impl Bitboard {
    /// A bitboard with no squares set.
    pub const EMPTY: Self = Self(0);

    /// Construct a bitboard with only the square at a row-major `index` set
    /// (0 is the upper-left, 63 the lower-right).
    #[inline]
    pub const fn from_square(index: usize) -> Self {
        Self(1 << (NUM_SPACES - 1 - index))
    }

    /// Count the number of occupied spaces in the bitboard.
    #[inline]
    pub fn count_occupied(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Count the number of empty spaces in the bitboard.
    #[inline]
    pub fn count_empty(self) -> u8 {
        self.0.count_zeros() as u8
    }

    /// Return true if this bitboard is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return true if every square set in `other` is also set in `self`.
    #[inline]
    pub fn contains_all(self, other: Bitboard) -> bool {
        self.0 & other.0 == other.0
    }

    /// Split off the first set square in row-major order, if any.
    #[inline]
    pub(crate) fn pop_first(&mut self) -> Option<Bitboard> {
        if self.is_empty() {
            return None;
        }

        let first = Bitboard(1 << (63 - self.0.leading_zeros()));
        self.0 ^= first.0;
        Some(first)
    }
}

/// Iterator for the bits in a [`Bitboard`].
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    remaining: usize,
    bitboard: Bitboard,
}

impl Iterator for Bits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let bitmask = Bitboard::from(1u64 << (self.remaining - 1));
        let bit = !(self.bitboard & bitmask).is_empty();
        self.remaining -= 1;

        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Bits {}

/// Iterate over the bits in row-major order.
impl IntoIterator for Bitboard {
    type Item = bool;
    type IntoIter = Bits;

    fn into_iter(self) -> Self::IntoIter {
        Bits {
            remaining: NUM_SPACES,
            bitboard: self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_bitboards_are_disjoint() {
        assert!((BLACK_START & WHITE_START).is_empty());
        assert_eq!((BLACK_START | WHITE_START).count_occupied(), 4);
        assert_eq!((BLACK_START | WHITE_START).count_empty(), 60);
    }

    #[test]
    fn from_square_corners() {
        assert_eq!(Bitboard::from_square(0), Bitboard::from(1u64 << 63));
        assert_eq!(Bitboard::from_square(63), Bitboard::from(1u64));
    }

    #[test]
    fn bits_run_row_major() {
        let bits: Vec<bool> = Bitboard::from_square(9).into_iter().collect();
        assert_eq!(bits.len(), NUM_SPACES);
        assert!(bits[9]);
        assert_eq!(bits.iter().filter(|&&bit| bit).count(), 1);
    }

    #[test]
    fn pop_first_takes_upper_left_first() {
        let mut bitboard = Bitboard::from_square(40) | Bitboard::from_square(3);
        assert_eq!(bitboard.pop_first(), Some(Bitboard::from_square(3)));
        assert_eq!(bitboard.pop_first(), Some(Bitboard::from_square(40)));
        assert_eq!(bitboard.pop_first(), None);
    }

    #[test]
    fn contains_all_is_subset() {
        assert!(BLACK_START.contains_all(Bitboard::from_square(28)));
        assert!(!BLACK_START.contains_all(WHITE_START));
        assert!(WHITE_START.contains_all(Bitboard::EMPTY));
    }

    #[test]
    fn display_grid() {
        let expected = "   A B C D E F G H\n \
                        1 . . . . . . . . \n \
                        2 . . . . . . . . \n \
                        3 . . . . . . . . \n \
                        4 . . . . # . . . \n \
                        5 . . . # . . . . \n \
                        6 . . . . . . . . \n \
                        7 . . . . . . . . \n \
                        8 . . . . . . . . ";
        assert_eq!(BLACK_START.to_string(), expected);
    }
}
