//! Code for working with [`Location`]s on the Othello board.

use crate::bitboard::Bitboard;
use crate::utils::{COLUMN_LABELS, ROW_LABELS};
use crate::{EDGE_LENGTH, NUM_SPACES};
use derive_more::{Display, Error, From, Into};
use std::fmt::{self, Formatter, Write};

/// A location on the Othello board, stored as a one-hot [`Bitboard`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Into)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u64", into = "u64")
)]
pub struct Location(Bitboard);

/// A set of locations on the Othello board, which can be iterated in row-major order.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, From, Into)]
pub struct LocationList(Bitboard);

impl Location {
    /// Convert from a row-major square index (0 is A1, 63 is H8).
    /// Returns None if the index is off the board.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < NUM_SPACES).then(|| Self(Bitboard::from_square(index)))
    }

    /// Convert into a row-major square index.
    #[inline]
    pub fn to_index(self) -> usize {
        let bitboard: u64 = self.0.into();
        bitboard.leading_zeros() as usize
    }

    /// Convert from row and column coordinates.
    /// Returns None if the coordinates are not on the board.
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row >= EDGE_LENGTH || col >= EDGE_LENGTH {
            return None;
        }
        Self::from_index(row * EDGE_LENGTH + col)
    }

    /// Get the row and column coordinates.
    pub fn to_coords(self) -> (usize, usize) {
        let index = self.to_index();
        (index / EDGE_LENGTH, index % EDGE_LENGTH)
    }

    #[inline]
    pub fn row(self) -> usize {
        self.to_index() / EDGE_LENGTH
    }

    #[inline]
    pub fn col(self) -> usize {
        self.to_index() % EDGE_LENGTH
    }

    /// Step `(d_row, d_col)` squares away, or None if that leaves the board.
    #[inline]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row().checked_add_signed(d_row)?;
        let col = self.col().checked_add_signed(d_col)?;
        Self::from_coords(row, col)
    }

    /// Every location on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..NUM_SPACES).filter_map(Self::from_index)
    }
}

/// Convert this [`Location`] into string notation ("D3" is row 2, column 3).
impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_coords();
        let row_str = ROW_LABELS.chars().nth(row).ok_or(fmt::Error)?;
        let col_str = COLUMN_LABELS.chars().nth(col).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        f.write_char(row_str)
    }
}

#[derive(Debug, PartialEq, Eq, Display, Error)]
#[display("invalid location string")]
pub struct ParseLocationError;

#[derive(Debug, PartialEq, Eq, Display, Error)]
#[display("a location must have exactly one bit set")]
pub struct InvalidLocationError;

/// Accept a raw bitboard only if it names exactly one square.
impl TryFrom<u64> for Location {
    type Error = InvalidLocationError;

    fn try_from(bits: u64) -> Result<Self, Self::Error> {
        if bits.count_ones() == 1 {
            Ok(Self(Bitboard::from(bits)))
        } else {
            Err(InvalidLocationError)
        }
    }
}

impl From<Location> for u64 {
    fn from(loc: Location) -> u64 {
        loc.0.into()
    }
}

/// Build a [`Location`] from a 1-indexed string notation ("D3", "f5").
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let col_str = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let col = COLUMN_LABELS.find(col_str).ok_or(ParseLocationError)?;
        let row = chars
            .next()
            .ok_or(ParseLocationError)?
            .to_digit(10)
            .ok_or(ParseLocationError)? as usize;

        if row == 0 || chars.next().is_some() {
            return Err(ParseLocationError);
        }

        Self::from_coords(row - 1, col).ok_or(ParseLocationError)
    }
}

impl LocationList {
    /// Returns whether `loc` is in this list.
    #[inline]
    pub fn contains(self, loc: Location) -> bool {
        self.0.contains_all(loc.into())
    }

    /// Add `loc` to this list.
    #[inline]
    pub fn insert(&mut self, loc: Location) {
        self.0 |= Bitboard::from(loc);
    }

    /// Returns whether the list holds no locations.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    /// Number of locations in the list.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_occupied() as usize
    }
}

impl From<Location> for LocationList {
    fn from(loc: Location) -> Self {
        Self(loc.into())
    }
}

impl FromIterator<Location> for LocationList {
    fn from_iter<T: IntoIterator<Item = Location>>(iter: T) -> Self {
        let mut list = Self::default();
        for loc in iter {
            list.insert(loc);
        }
        list
    }
}

impl Iterator for LocationList {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        self.0.pop_first().map(Location)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_occupied() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for LocationList {}

impl fmt::Display for LocationList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|loc| loc.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        f.write_fmt(format_args!("[{}]", string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn location_from_index() {
        assert_eq!(
            Location::from_index(0),
            Some(Location(Bitboard::from(1u64 << 63)))
        );
        assert_eq!(Location::from_index(63), Some(Location(Bitboard::from(1u64))));
        assert_eq!(Location::from_index(64), None);
    }

    #[test]
    fn location_to_index() {
        assert_eq!(Location(Bitboard::from(1u64 << 63)).to_index(), 0);
        assert_eq!(Location(Bitboard::from(1u64)).to_index(), 63);
    }

    #[test]
    fn location_from_coords() {
        assert_eq!(
            Location::from_coords(0, 0),
            Some(Location(Bitboard::from(1u64 << 63)))
        );
        assert_eq!(Location::from_coords(7, 7), Some(Location(Bitboard::from(1u64))));
        assert_eq!(Location::from_coords(0, 8), None);
        assert_eq!(Location::from_coords(8, 0), None);
    }

    #[test]
    fn location_to_coords() {
        for row in 0..EDGE_LENGTH {
            for col in 0..EDGE_LENGTH {
                let loc = Location::from_coords(row, col).unwrap();
                assert_eq!(loc.to_coords(), (row, col));
                assert_eq!((loc.row(), loc.col()), (row, col));
            }
        }
    }

    #[test]
    fn location_offset() {
        let d4 = Location::from_coords(3, 3).unwrap();
        assert_eq!(d4.offset(-1, 1), Location::from_coords(2, 4));
        assert_eq!(d4.offset(4, 4), Location::from_coords(7, 7));
        assert_eq!(d4.offset(5, 0), None);

        let a1 = Location::from_coords(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(1, 1), Location::from_coords(1, 1));
    }

    #[test]
    fn all_locations_row_major() {
        let all: Vec<usize> = Location::all().map(Location::to_index).collect();
        assert_eq!(all, (0..NUM_SPACES).collect::<Vec<_>>());
    }

    #[test]
    fn location_from_str_success() {
        assert_eq!(
            Location::from_str("A1"),
            Ok(Location(Bitboard::from(1u64 << 63)))
        );
        assert_eq!(Location::from_str("h8"), Ok(Location(Bitboard::from(1u64))));
        assert_eq!(Location::from_str("D3"), Ok(Location::from_coords(2, 3).unwrap()));
        assert_eq!(Location::from_str(" f5\n"), Ok(Location::from_coords(4, 5).unwrap()));
    }

    #[test]
    fn location_from_str_fail() {
        assert_eq!(Location::from_str(""), Err(ParseLocationError));
        assert_eq!(Location::from_str("A12"), Err(ParseLocationError));
        assert_eq!(Location::from_str("AA"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A0"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A9"), Err(ParseLocationError));
        assert_eq!(Location::from_str("I5"), Err(ParseLocationError));
    }

    #[test]
    fn location_to_str() {
        assert_eq!(Location(Bitboard::from(1u64)).to_string(), "H8");
        assert_eq!(Location(Bitboard::from(1u64 << 63)).to_string(), "A1");
        assert_eq!(Location::from_str("E2").unwrap().to_string(), "E2");
        assert_eq!(Location::from_str("F6").unwrap().to_string(), "F6");
    }

    #[test]
    fn location_list_set_operations() {
        let d3 = Location::from_str("D3").unwrap();
        let c4 = Location::from_str("C4").unwrap();
        let mut list = LocationList::default();
        assert!(list.is_empty());

        list.insert(c4);
        list.insert(d3);
        list.insert(d3);
        assert_eq!(list.len(), 2);
        assert!(list.contains(d3));
        assert!(!list.contains(Location::from_str("E6").unwrap()));
        assert_eq!(list.collect::<Vec<_>>(), vec![d3, c4]);
    }

    #[test]
    fn location_list_display() {
        let list: LocationList = ["F5", "D3", "E6", "C4"]
            .iter()
            .map(|s| s.parse::<Location>().unwrap())
            .collect();
        assert_eq!(list.to_string(), "[D3, C4, F5, E6]");
        assert_eq!(LocationList::default().to_string(), "[]");
    }

    #[test]
    fn location_from_bits() {
        assert_eq!(Location::try_from(1u64 << 63).ok(), Location::from_coords(0, 0));
        assert_eq!(u64::from(Location::from_str("H8").unwrap()), 1);
        assert_eq!(Location::try_from(0u64), Err(InvalidLocationError));
        assert_eq!(
            Location::try_from((1u64 << 63) | 1),
            Err(InvalidLocationError)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn location_deserialize_requires_one_square() {
        let d3 = Location::from_str("D3").unwrap();
        let json = serde_json::to_string(&d3).unwrap();
        assert_eq!(json, u64::from(d3).to_string());
        assert_eq!(serde_json::from_str::<Location>(&json).unwrap(), d3);

        assert!(serde_json::from_str::<Location>("0").is_err());
        // A1 and H8 together.
        assert!(serde_json::from_str::<Location>("9223372036854775809").is_err());
    }
}
