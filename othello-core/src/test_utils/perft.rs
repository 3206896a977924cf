//! "Perft" performance test: count the positions reachable at a given depth.
//! A forced pass counts as one ply; a finished game is a leaf at any depth.
//! Reference counts: http://www.aartbik.com/MISC/reversi.html

use crate::board::Board;

/// Leaves `depth` plies below the starting position.
pub fn run_perft(depth: u32) -> u64 {
    count_leaves(Board::default(), depth)
}

/// Leaves `depth` plies below `board`, with its active player to move.
pub fn count_leaves(board: Board, depth: u32) -> u64 {
    walk(board, depth, false)
}

fn walk(board: Board, depth: u32, passed: bool) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.get_moves();
    if moves.is_empty() {
        return if passed {
            1
        } else {
            walk(board.pass(), depth - 1, true)
        };
    }

    moves
        .map(|loc| walk(board.apply_move(loc), depth - 1, false))
        .sum()
}
