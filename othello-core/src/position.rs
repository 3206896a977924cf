//! The absolute board state and its conversions.

use crate::bitboard::{self, Bitboard};
use crate::game::{GameError, Player};
use crate::{Board, CellArray, Color, Location, LocationList, NUM_SPACES};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter};

/// Pieces of both colors, packed into two disjoint bitboards.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    black: Bitboard,
    white: Bitboard,
}

/// An inconsistency found while building a [`Position`] or [`CellArray`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum PositionError {
    #[display(fmt = "black and white overlap at\n{}", overlap)]
    Overlap { overlap: Bitboard },
    #[display(fmt = "expected 64 cells, got {}", len)]
    WrongLength { len: usize },
}

/// Failure to read a position from text.
#[derive(Debug, Display, Error, Eq, PartialEq)]
pub enum ParsePositionError {
    #[display(fmt = "unexpected character {:?}", character)]
    BadCharacter { character: char },
    #[display(fmt = "expected 64 cells, got {}", count)]
    WrongCellCount { count: usize },
}

impl Default for Position {
    /// The standard starting position.
    fn default() -> Self {
        Self {
            black: bitboard::BLACK_START,
            white: bitboard::WHITE_START,
        }
    }
}

impl Position {
    /// The board with no pieces on it.
    pub const EMPTY: Self = Self {
        black: Bitboard::EMPTY,
        white: Bitboard::EMPTY,
    };

    /// Build a position from one bitboard per color.
    /// Panics if the bitboards overlap: that can only come from corrupted state.
    pub fn from_bitboards(black: Bitboard, white: Bitboard) -> Self {
        match Self::try_from_bitboards(black, white) {
            Ok(position) => position,
            Err(err) => panic!("corrupt packed position: {}", err),
        }
    }

    /// Build a position from one bitboard per color, rejecting overlapping masks.
    pub fn try_from_bitboards(black: Bitboard, white: Bitboard) -> Result<Self, PositionError> {
        let overlap = black & white;
        if !overlap.is_empty() {
            return Err(PositionError::Overlap { overlap });
        }
        Ok(Self { black, white })
    }

    /// Rebuild the absolute position from a board and the player it belongs to.
    pub fn from_board(board: Board, active_player: Player) -> Self {
        match active_player {
            Player::Black => Self::from_bitboards(board.active_bitboard, board.opponent_bitboard),
            Player::White => Self::from_bitboards(board.opponent_bitboard, board.active_bitboard),
        }
    }

    /// Encode an array position. Never fails: every array is a consistent board.
    pub fn from_array(cells: &CellArray) -> Self {
        let mut black = Bitboard::EMPTY;
        let mut white = Bitboard::EMPTY;
        for (index, color) in cells.iter().enumerate() {
            match color {
                Color::Black => black |= Bitboard::from_cell(index as u8),
                Color::White => white |= Bitboard::from_cell(index as u8),
                Color::Empty => {}
            }
        }
        Self { black, white }
    }

    /// Decode into the per-cell representation.
    pub fn to_array(&self) -> CellArray {
        let mut cells = CellArray::default();
        for index in 0..NUM_SPACES {
            cells[index] = self.color_at(Location::from_index(index as u8));
        }
        cells
    }

    pub fn bitboard(&self, player: Player) -> Bitboard {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// The position as seen by `player`, who is about to move.
    pub fn board(&self, player: Player) -> Board {
        Board {
            active_bitboard: self.bitboard(player),
            opponent_bitboard: self.bitboard(!player),
        }
    }

    pub fn color_at(&self, loc: Location) -> Color {
        let mask: Bitboard = loc.into();
        if !(self.black & mask).is_empty() {
            Color::Black
        } else if !(self.white & mask).is_empty() {
            Color::White
        } else {
            Color::Empty
        }
    }

    /// Number of pieces of `player`'s color.
    pub fn count(&self, player: Player) -> u8 {
        self.bitboard(player).count_occupied()
    }

    pub fn empty_mask(&self) -> Bitboard {
        !(self.black | self.white)
    }

    pub fn legal_moves(&self, player: Player) -> LocationList {
        self.board(player).get_moves()
    }

    /// Play `loc` for `player` and return the captured pieces.
    /// Panics if `loc` is not a legal move: callers must check legality first.
    pub fn apply_move(&mut self, player: Player, loc: Location) -> Bitboard {
        match self.try_apply_move(player, loc) {
            Ok(flips) => flips,
            Err(err) => panic!("{} for {} in\n{}", err, player, self),
        }
    }

    /// Play `loc` for `player` if it is legal, returning the captured pieces.
    pub fn try_apply_move(&mut self, player: Player, loc: Location) -> Result<Bitboard, GameError> {
        let board = self.board(player);
        let flips = board.get_flips(loc);
        if flips.is_empty() || !board.empty_mask().contains_cell(loc.to_index()) {
            return Err(GameError::IllegalMove { location: loc });
        }
        *self = Self::from_board(board.apply_move_in_place(loc), player);
        Ok(flips)
    }
}

/// Read a position from 64 cell characters in row-major order.
/// `X`, `B`, `#` or `*` mark Black, `O` or `W` mark White, `-`, `.` or `_` mark an empty cell;
/// whitespace is ignored.
impl std::str::FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = CellArray::default();
        let mut count = 0;

        for character in s.chars().filter(|c| !c.is_whitespace()) {
            let color = match character.to_ascii_uppercase() {
                'X' | 'B' | '#' | '*' => Color::Black,
                'O' | 'W' => Color::White,
                '-' | '.' | '_' => Color::Empty,
                _ => return Err(ParsePositionError::BadCharacter { character }),
            };
            if count < NUM_SPACES {
                cells[count] = color;
            }
            count += 1;
        }

        if count != NUM_SPACES {
            return Err(ParsePositionError::WrongCellCount { count });
        }
        Ok(Self::from_array(&cells))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_array(), f)
    }
}
