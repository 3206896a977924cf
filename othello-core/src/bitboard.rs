//! Low-level bitboard operations.
//!
//! For efficiency, [`Bitboard`] operations are unchecked and produce inconsistent
//! state if invalid data is passed (for example, overlapping player masks).
//!
//! Under the hood, all these operations work on u64 bitboards. By convention,
//! the MSB is the upper-left of the board, and uses row-major order:
//! cell index `i` lives at bit `63 - i`.

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
pub struct Bitboard(u64);

/// Starting bitboard for Black (e4, d5).
pub const BLACK_START: Bitboard = Bitboard(0x0000000810000000);

/// Starting bitboard for White (d4, e5).
pub const WHITE_START: Bitboard = Bitboard(0x0000001008000000);

/// Everything except the leftmost column.
const NOT_LEFT_COLUMN: u64 = 0x7f7f7f7f7f7f7f7f;

/// Everything except the rightmost column.
const NOT_RIGHT_COLUMN: u64 = 0xfefefefefefefefe;

const FULL_MASK: u64 = 0xffffffffffffffff;

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
    /// The bitboard with no locations set.
    pub const EMPTY: Self = Bitboard(0);

    /// Bitboard with only the cell at row-major `index` set.
    #[inline]
    pub const fn from_cell(index: u8) -> Self {
        Bitboard(1u64 << (63 - index as u32))
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

    /// Return true if the cell at row-major `index` is set.
    #[inline]
    pub fn contains_cell(self, index: u8) -> bool {
        !(self & Self::from_cell(index)).is_empty()
    }

    /// Split the bits in this bitboard into an array, in row-major cell order.
    #[inline]
    pub fn unpack(self) -> [bool; NUM_SPACES] {
        let mut cells = [false; NUM_SPACES];
        for (cell, bit) in cells.iter_mut().zip(self) {
            *cell = bit;
        }
        cells
    }
}

/// One of the eight compass directions a ray can travel on the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// (bit distance of one step, whether a step is a left shift).
    #[inline]
    fn step(self) -> (u32, bool) {
        match self {
            Direction::North => (8, true),
            Direction::NorthEast => (7, true),
            Direction::East => (1, false),
            Direction::SouthEast => (9, false),
            Direction::South => (8, false),
            Direction::SouthWest => (7, false),
            Direction::West => (1, true),
            Direction::NorthWest => (9, true),
        }
    }

    /// Cells a single step in this direction may land on without wrapping around an edge.
    #[inline]
    fn landing_mask(self) -> u64 {
        match self {
            Direction::North | Direction::South => FULL_MASK,
            Direction::NorthEast | Direction::East | Direction::SouthEast => NOT_LEFT_COLUMN,
            Direction::SouthWest | Direction::West | Direction::NorthWest => NOT_RIGHT_COLUMN,
        }
    }

    /// Shift by `steps` cells in this direction, without clipping wraparound.
    #[inline]
    fn shift_unmasked(self, bits: u64, steps: u32) -> u64 {
        let (distance, left) = self.step();
        if left {
            bits << (distance * steps)
        } else {
            bits >> (distance * steps)
        }
    }

    /// Move every location in `bitboard` one cell in this direction.
    /// Locations that would leave the board are dropped.
    #[inline]
    pub fn shift(self, bitboard: Bitboard) -> Bitboard {
        Bitboard(self.shift_unmasked(bitboard.0, 1) & self.landing_mask())
    }

    /// Occluded fill: extend `generators` through `propagators` in this direction,
    /// doubling the step length each round (1, 2, 4) to cover up to seven cells.
    #[inline]
    fn fill(self, generators: u64, propagators: u64) -> u64 {
        let mut gen = generators;
        let mut pro = propagators & self.landing_mask();

        gen |= pro & self.shift_unmasked(gen, 1);
        pro &= self.shift_unmasked(pro, 1);
        gen |= pro & self.shift_unmasked(gen, 2);
        pro &= self.shift_unmasked(pro, 2);
        gen |= pro & self.shift_unmasked(gen, 4);

        gen
    }
}

/// Score a board as: # my pieces - # opponent pieces.
/// Undefined behavior if both players have a piece at the same location.
#[inline]
pub fn score_absolute_difference(active: Bitboard, opponent: Bitboard) -> i8 {
    (active.0.count_ones() as i8) - (opponent.0.count_ones() as i8)
}

/// Compute a mask of the legal moves for the active player from
/// masks of the active player's pieces and the opponent's pieces.
/// All empty cells are tested at once, one direction at a time.
/// Undefined behavior if an invalid Othello board is specified.
#[inline]
pub fn get_move_mask(active: Bitboard, opponent: Bitboard) -> Bitboard {
    let empties = !(active.0 | opponent.0);
    let mut moves = 0;

    for &direction in Direction::ALL.iter() {
        // Opponent runs anchored on one of our pieces, then one extra step onto an empty.
        let runs = direction.fill(active.0, opponent.0) & opponent.0;
        moves |= direction.shift_unmasked(runs, 1) & direction.landing_mask();
    }

    Bitboard(empties & moves)
}

/// Compute the opponent pieces captured if the active player moves at `move_mask`,
/// which must be a one-hot bitboard. Empty if the move captures nothing.
/// Undefined behavior if an invalid Othello board or `move_mask` is provided.
#[inline]
pub fn get_flips(active: Bitboard, opponent: Bitboard, move_mask: Bitboard) -> Bitboard {
    let mut flips = 0;

    for &direction in Direction::ALL.iter() {
        // Opponent pieces reachable from the new piece, and from our pieces coming back.
        let from_move = direction.fill(move_mask.0, opponent.0);
        let from_active = direction.opposite().fill(active.0, opponent.0);
        flips |= from_move & from_active;
    }

    Bitboard(flips & opponent.0)
}

/// Compute an updated board after a given move is made, returning new bitboards
/// for the active player and the opponent. `move_mask` must be a one-hot bitboard
/// indicating the move location. Undefined behavior if an invalid Othello board
/// or `move_mask` is provided.
#[inline]
pub fn apply_move(
    active: Bitboard,
    opponent: Bitboard,
    move_mask: Bitboard,
) -> (Bitboard, Bitboard) {
    let flip_mask = get_flips(active, opponent, move_mask);

    let new_active = Bitboard((active.0 ^ flip_mask.0) | move_mask.0);
    let new_opponent = Bitboard(opponent.0 ^ flip_mask.0);

    (new_active, new_opponent)
}

/// Iterator for the bits in a [`Bitboard`], in row-major cell order.
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
