//! `othello-core` is the board-level half of an Othello engine: position
//! encodings, bit-parallel move generation and the turn state machine.
//!
//! This package implements three levels of abstraction:
//!
//!  - [`bitboard`] contains the raw, unchecked operations for working with packed boards.
//!    These are fast, but may result in inconsistent state if their contracts are not
//!    manually checked.
//!  - [`Board`] and [`Position`] implement the core game logic on top of [`bitboard`],
//!    seen from the side to move and from the absolute colors respectively.
//!    [`CellArray`] is the plain per-cell encoding of the same data.
//!  - [`Game`] is a high-level, safe interface that tracks turns, passes and the move record.

pub mod bitboard;
pub mod test_utils;

mod array;
mod board;
mod game;
mod location;
mod position;
mod utils;

pub use array::*;
pub use board::*;
pub use game::*;
pub use location::*;
pub use position::*;
pub use utils::format_grid;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
