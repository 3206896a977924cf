//! A position seen from the side to move.
//!
//! [`Board`] is the hot-loop type: it stores the mover's and the opponent's pieces,
//! so the same code serves both colors. Its operations are unchecked.

use crate::bitboard::{self, Bitboard};
use crate::{Location, LocationList};
use std::fmt::{self, Display, Formatter};

/// A pair of bitboards storing the pieces of the player to move and of their opponent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    pub active_bitboard: Bitboard,
    pub opponent_bitboard: Bitboard,
}

impl Default for Board {
    /// The starting position with Black to move.
    fn default() -> Self {
        Self {
            active_bitboard: bitboard::BLACK_START,
            opponent_bitboard: bitboard::WHITE_START,
        }
    }
}

impl Board {
    /// Swap the roles of the two players without making a move.
    #[inline]
    pub fn pass(self) -> Self {
        Self {
            active_bitboard: self.opponent_bitboard,
            opponent_bitboard: self.active_bitboard,
        }
    }

    /// Get the list of legal moves for the active player.
    #[inline]
    pub fn get_moves(self) -> LocationList {
        bitboard::get_move_mask(self.active_bitboard, self.opponent_bitboard).into()
    }

    /// Opponent pieces the active player would capture by moving at `loc`.
    /// Empty when `loc` is not a legal move.
    #[inline]
    pub fn get_flips(self, loc: Location) -> Bitboard {
        bitboard::get_flips(self.active_bitboard, self.opponent_bitboard, loc.into())
    }

    /// Make a move for the active player, keeping the same player active.
    /// Does not check that `loc` is legal.
    #[inline]
    pub fn apply_move_in_place(self, loc: Location) -> Self {
        let (active_bitboard, opponent_bitboard) =
            bitboard::apply_move(self.active_bitboard, self.opponent_bitboard, loc.into());
        Self {
            active_bitboard,
            opponent_bitboard,
        }
    }

    /// Make a move for the active player and hand the turn to the opponent.
    /// Does not check that `loc` is legal.
    #[inline]
    pub fn apply_move(self, loc: Location) -> Self {
        self.apply_move_in_place(loc).pass()
    }

    /// Score a board as: # my pieces - # opponent pieces.
    #[inline]
    pub fn score_absolute_difference(self) -> i8 {
        bitboard::score_absolute_difference(self.active_bitboard, self.opponent_bitboard)
    }

    /// Get a mask indicating where the occupied spaces are.
    #[inline]
    pub fn occupied_mask(self) -> Bitboard {
        self.active_bitboard | self.opponent_bitboard
    }

    /// Get a mask indicating where the empty spaces are.
    #[inline]
    pub fn empty_mask(self) -> Bitboard {
        !self.occupied_mask()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        crate::format_grid(
            self.active_bitboard
                .into_iter()
                .zip(self.opponent_bitboard)
                .map(|pair| match pair {
                    (true, _) => '#',
                    (_, true) => 'O',
                    _ => '.',
                }),
            f,
        )
    }
}
