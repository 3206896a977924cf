//! Code for working with [`Location`]s on the Othello board.

use crate::bitboard::Bitboard;
use crate::{EDGE_LENGTH, NUM_SPACES};
use derive_more::{Display, Error, From, Into};
use std::fmt::{self, Formatter, Write};

/// A location on the Othello board.
/// Ordered by row-major cell index, so the upper-left cell sorts first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Into)]
pub struct Location(Bitboard);

/// A list of locations on the Othello board, which can be iterated to retrieve them.
/// Iteration yields locations in increasing cell index order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, From, Into)]
pub struct LocationList(Bitboard);

impl Location {
    /// Convert from a one-hot [`Bitboard`].
    #[inline]
    pub fn from_onehot(bitboard: Bitboard) -> Self {
        assert_eq!(bitboard.count_occupied(), 1);
        Self::from_onehot_unchecked(bitboard)
    }

    /// Convert from a one-hot [`Bitboard`] without checking this invariant.
    /// Results in inconsistent state if `bitboard` has more than one location set.
    #[inline]
    pub fn from_onehot_unchecked(bitboard: Bitboard) -> Self {
        Self(bitboard)
    }

    /// Convert from a row-major cell index (0 is the upper-left, 63 the lower-right).
    #[inline]
    pub fn from_index(index: u8) -> Self {
        assert!(
            (index as usize) < NUM_SPACES,
            "cell index {} is off the board",
            index
        );
        Self(Bitboard::from_cell(index))
    }

    /// Convert from a cell index, or `None` if it is off the board.
    pub fn checked_from_index(index: i64) -> Option<Self> {
        if (0..NUM_SPACES as i64).contains(&index) {
            Some(Self::from_index(index as u8))
        } else {
            None
        }
    }

    /// Convert into a row-major cell index.
    #[inline]
    pub fn to_index(self) -> u8 {
        let bitboard: u64 = self.0.into();
        bitboard.leading_zeros() as u8
    }

    /// Convert from row and column coordinates.
    pub fn from_coords(row: usize, col: usize) -> Self {
        assert!(row < EDGE_LENGTH && col < EDGE_LENGTH);
        Self::from_index((row * EDGE_LENGTH + col) as u8)
    }

    /// Get the row and column coordinates.
    pub fn to_coords(self) -> (usize, usize) {
        let index = self.to_index() as usize;
        (index / EDGE_LENGTH, index % EDGE_LENGTH)
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

/// Convert this [`Location`] into string notation ("A4").
impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_coords();
        let row_str = "12345678".chars().nth(row).ok_or(fmt::Error)?;
        let col_str = "ABCDEFGH".chars().nth(col).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        f.write_char(row_str)
    }
}

impl LocationList {
    /// Returns whether `loc` is in this list.
    pub fn contains(self, loc: Location) -> bool {
        let loc_bitboard: Bitboard = loc.into();
        !(loc_bitboard & self.0).is_empty()
    }

    /// Returns whether there are no locations in this list.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, PartialEq, Display, Error)]
#[display(fmt = "invalid location string")]
pub struct ParseLocationError;

/// Build a [`Location`] from a 1-indexed string notation ("A4", case-insensitive)
/// or from a cell index ("0" through "63").
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<i64>() {
            return Self::checked_from_index(index).ok_or(ParseLocationError);
        }

        let mut chars = s.chars();
        let col_str = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let col = "ABCDEFGH".find(col_str).ok_or(ParseLocationError)?;
        let row = chars
            .next()
            .ok_or(ParseLocationError)?
            .to_digit(10)
            .ok_or(ParseLocationError)? as usize;

        if row == 0 || row > EDGE_LENGTH || chars.next() != None {
            return Err(ParseLocationError);
        }

        Ok(Self::from_coords(row - 1, col))
    }
}

impl ExactSizeIterator for LocationList {}

impl Iterator for LocationList {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.is_empty() {
            return None;
        }

        let bitboard: u64 = self.0.into();
        let next_move = Bitboard::from_cell(bitboard.leading_zeros() as u8);
        self.0 ^= next_move;

        Some(Location::from_onehot_unchecked(next_move))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_occupied() as usize;
        (len, Some(len))
    }
}

impl fmt::Display for LocationList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|mv| mv.to_string())
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
        assert_eq!(Location::from_index(0), Location(Bitboard::from(1 << 63)));
        assert_eq!(Location::from_index(63), Location(Bitboard::from(1)));
    }

    #[test]
    fn location_to_index() {
        assert_eq!(Location(Bitboard::from(1 << 63)).to_index(), 0);
        assert_eq!(Location(Bitboard::from(1)).to_index(), 63);
    }

    #[test]
    fn location_from_coords() {
        assert_eq!(Location::from_coords(0, 0), Location::from_index(0));
        assert_eq!(Location::from_coords(2, 3), Location::from_index(19));
        assert_eq!(Location::from_coords(7, 7), Location::from_index(63));
    }

    #[test]
    #[should_panic]
    fn location_from_coords_fail() {
        Location::from_coords(0, 8);
    }

    #[test]
    fn location_to_coords() {
        assert_eq!(Location::from_index(0).to_coords(), (0, 0));
        assert_eq!(Location::from_index(19).to_coords(), (2, 3));
        assert_eq!(Location::from_index(63).to_coords(), (7, 7));
    }

    #[test]
    fn location_from_str_success() {
        assert_eq!(Location::from_str("A1"), Ok(Location::from_index(0)));
        assert_eq!(Location::from_str("h8"), Ok(Location::from_index(63)));
        assert_eq!(Location::from_str("d3"), Ok(Location::from_coords(2, 3)));
        assert_eq!(Location::from_str("19"), Ok(Location::from_index(19)));
        assert_eq!(Location::from_str(" 0"), Ok(Location::from_index(0)));
    }

    #[test]
    fn location_from_str_fail() {
        assert_eq!(Location::from_str(""), Err(ParseLocationError));
        assert_eq!(Location::from_str("A12"), Err(ParseLocationError));
        assert_eq!(Location::from_str("AA"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A9"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A0"), Err(ParseLocationError));
        assert_eq!(Location::from_str("I5"), Err(ParseLocationError));
        assert_eq!(Location::from_str("64"), Err(ParseLocationError));
        assert_eq!(Location::from_str("-1"), Err(ParseLocationError));
    }

    #[test]
    fn location_to_str() {
        assert_eq!(Location::from_index(63).to_string(), "H8");
        assert_eq!(Location::from_index(0).to_string(), "A1");
        assert_eq!(Location::from_str("E2").unwrap().to_string(), "E2");
        assert_eq!(Location::from_str("F6").unwrap().to_string(), "F6");
    }

    #[test]
    fn location_list_iterates_in_index_order() {
        let bitboard = Bitboard::from_cell(44) | Bitboard::from_cell(19) | Bitboard::from_cell(37);
        let list = LocationList::from(bitboard);
        assert_eq!(list.len(), 3);
        let indices: Vec<u8> = list.map(Location::to_index).collect();
        assert_eq!(indices, vec![19, 37, 44]);
    }
}
