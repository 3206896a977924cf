//! The plain per-cell encoding of a position.
//!
//! Strategies that predate the packed engine work on arrays; conversion to and from
//! [`Position`](crate::Position) lives in `position.rs`.

use crate::game::Player;
use crate::{utils, Location, NUM_SPACES};
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::ops::{Index, IndexMut};

/// The contents of one cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Empty,
    Black,
    White,
}

impl Default for Color {
    fn default() -> Self {
        Self::Empty
    }
}

impl Color {
    /// The character used when printing boards: `#` for Black, `O` for White.
    pub fn symbol(self) -> char {
        match self {
            Color::Empty => '.',
            Color::Black => '#',
            Color::White => 'O',
        }
    }
}

impl From<Player> for Color {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Color::Black,
            Player::White => Color::White,
        }
    }
}

/// Every cell of the board in row-major order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CellArray([Color; NUM_SPACES]);

impl Default for CellArray {
    fn default() -> Self {
        Self([Color::Empty; NUM_SPACES])
    }
}

impl CellArray {
    pub fn new(cells: [Color; NUM_SPACES]) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Color; NUM_SPACES] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.0.iter().copied()
    }

    /// Number of cells holding `color`.
    pub fn count(&self, color: Color) -> usize {
        self.iter().filter(|&c| c == color).count()
    }
}

impl Index<usize> for CellArray {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.0[index]
    }
}

impl IndexMut<usize> for CellArray {
    fn index_mut(&mut self, index: usize) -> &mut Color {
        &mut self.0[index]
    }
}

impl Index<Location> for CellArray {
    type Output = Color;

    fn index(&self, loc: Location) -> &Color {
        &self.0[loc.to_index() as usize]
    }
}

/// Rejects slices that do not cover exactly one board.
impl TryFrom<&[Color]> for CellArray {
    type Error = crate::PositionError;

    fn try_from(cells: &[Color]) -> Result<Self, Self::Error> {
        if cells.len() != NUM_SPACES {
            return Err(crate::PositionError::WrongLength { len: cells.len() });
        }
        let mut array = Self::default();
        array.0.copy_from_slice(cells);
        Ok(array)
    }
}

impl Display for CellArray {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        utils::format_grid(self.iter().map(Color::symbol), f)
    }
}
