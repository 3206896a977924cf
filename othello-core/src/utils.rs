//! Miscellaneous project utilities.

use crate::EDGE_LENGTH;
use std::fmt::{self, Formatter};

const COLUMN_LABELS: &str = "ABCDEFGH";

/// Write one character per cell as a labelled 8x8 grid.
/// `cells` must yield exactly 64 items, in row-major order.
pub fn format_grid<I: IntoIterator<Item = char>>(cells: I, f: &mut Formatter) -> fmt::Result {
    let mut cells = cells.into_iter();

    f.write_str("  ")?;
    for label in COLUMN_LABELS.chars() {
        write!(f, " {}", label)?;
    }

    for row in 1..=EDGE_LENGTH {
        write!(f, "\n{:>2}", row)?;
        for _ in 0..EDGE_LENGTH {
            write!(f, " {}", cells.next().ok_or(fmt::Error)?)?;
        }
    }

    // Leftover cells mean the caller broke the contract.
    match cells.next() {
        None => Ok(()),
        Some(_) => Err(fmt::Error),
    }
}
