//! A slow, obviously-correct move engine over [`CellArray`].
//!
//! Every rule is checked one cell at a time by walking rays outward from the
//! candidate cell. The packed engine in [`bitboard`](crate::bitboard) is tested
//! against this one.

use crate::{CellArray, Color, Player, EDGE_LENGTH, NUM_SPACES};

/// (row step, column step) for the eight compass directions.
const RAYS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Cell indices `player` would capture by playing at `index`, in ray order.
/// Empty if the cell is occupied or the move captures nothing.
pub fn flips(cells: &CellArray, player: Player, index: usize) -> Vec<usize> {
    if cells[index] != Color::Empty {
        return Vec::new();
    }

    let own = Color::from(player);
    let other = Color::from(!player);
    let row = (index / EDGE_LENGTH) as i8;
    let col = (index % EDGE_LENGTH) as i8;
    let mut captured = Vec::new();

    for &(dr, dc) in RAYS.iter() {
        let mut run = Vec::new();
        let (mut r, mut c) = (row + dr, col + dc);

        while on_board(r, c) {
            let cell = r as usize * EDGE_LENGTH + c as usize;
            match cells[cell] {
                color if color == other => run.push(cell),
                color if color == own => {
                    captured.append(&mut run);
                    break;
                }
                _ => break,
            }
            r += dr;
            c += dc;
        }
    }

    captured
}

/// Every cell `player` may legally play, in increasing index order.
pub fn legal_moves(cells: &CellArray, player: Player) -> Vec<usize> {
    (0..NUM_SPACES)
        .filter(|&index| !flips(cells, player, index).is_empty())
        .collect()
}

/// Play `index` for `player`, returning the number of captured discs.
/// Leaves `cells` untouched and returns 0 when the move is illegal.
pub fn apply(cells: &mut CellArray, player: Player, index: usize) -> usize {
    let captured = flips(cells, player, index);
    if captured.is_empty() {
        return 0;
    }

    let own = Color::from(player);
    cells[index] = own;
    for &cell in captured.iter() {
        cells[cell] = own;
    }
    captured.len()
}

fn on_board(row: i8, col: i8) -> bool {
    (0..EDGE_LENGTH as i8).contains(&row) && (0..EDGE_LENGTH as i8).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn starting_moves() {
        let cells = Position::default().to_array();
        assert_eq!(legal_moves(&cells, Player::Black), vec![19, 26, 37, 44]);
        assert_eq!(legal_moves(&cells, Player::White), vec![20, 29, 34, 43]);
    }

    #[test]
    fn opening_capture() {
        let mut cells = Position::default().to_array();
        assert_eq!(apply(&mut cells, Player::Black, 19), 1);
        assert_eq!(cells[27], Color::Black);
        assert_eq!(cells.count(Color::Black), 4);
        assert_eq!(cells.count(Color::White), 1);
    }

    #[test]
    fn illegal_move_is_a_no_op() {
        let mut cells = Position::default().to_array();
        let before = cells;
        assert_eq!(apply(&mut cells, Player::Black, 0), 0);
        assert_eq!(apply(&mut cells, Player::Black, 27), 0);
        assert_eq!(cells, before);
    }
}
