//! The packed engine against the ray-cast oracle, over random playouts.

use othello_core::bitboard::Bitboard;
use othello_core::test_utils::raycast;
use othello_core::{Color, Location, Player, Position};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

const MIN_POSITIONS: usize = 10_000;

fn indices(bitboard: Bitboard) -> Vec<usize> {
    bitboard
        .into_iter()
        .enumerate()
        .filter(|&(_, set)| set)
        .map(|(index, _)| index)
        .collect()
}

/// Check one position, with `player` to move, against the oracle.
fn check_position(position: &Position, player: Player) {
    let cells = position.to_array();
    assert_eq!(Position::from_array(&cells), *position);

    let packed: Vec<usize> = position
        .legal_moves(player)
        .map(|loc| loc.to_index() as usize)
        .collect();
    assert_eq!(
        packed,
        raycast::legal_moves(&cells, player),
        "\n{}",
        position
    );

    let board = position.board(player);
    for loc in position.legal_moves(player) {
        let mut expected = raycast::flips(&cells, player, loc.to_index() as usize);
        expected.sort_unstable();
        assert_eq!(
            indices(board.get_flips(loc)),
            expected,
            "{} in\n{}",
            loc,
            position
        );
    }
}

#[test]
fn packed_engine_matches_raycast() {
    let mut rng = StdRng::seed_from_u64(0x0de110);
    let mut checked = 0;

    while checked < MIN_POSITIONS {
        let mut position = Position::default();
        let mut player = Player::Black;
        let mut passed = false;

        loop {
            check_position(&position, player);
            check_position(&position, !player);
            checked += 1;

            match position.legal_moves(player).choose(&mut rng) {
                Some(loc) => {
                    let mut cells = position.to_array();
                    let before = position.count(player) + position.count(!player);
                    let flips = position.apply_move(player, loc);

                    // One new disc, captured discs change hands.
                    assert_eq!(position.count(player) + position.count(!player), before + 1);
                    assert_eq!(
                        raycast::apply(&mut cells, player, loc.to_index() as usize),
                        flips.count_occupied() as usize
                    );
                    assert_eq!(position.to_array(), cells);
                    passed = false;
                }
                None if passed => break,
                None => passed = true,
            }
            player = !player;
        }
    }
}

#[test]
fn terminal_outcome_is_symmetric() {
    // Full board, 40 to 24.
    let mut cells = Position::default().to_array();
    for index in 0..64 {
        cells[index] = if index < 40 { Color::Black } else { Color::White };
    }
    let position = Position::from_array(&cells);
    assert!(position.legal_moves(Player::Black).is_empty());
    assert!(position.legal_moves(Player::White).is_empty());

    let swapped = Position::from_bitboards(
        position.bitboard(Player::White),
        position.bitboard(Player::Black),
    );
    assert_eq!(
        position.board(Player::Black).score_absolute_difference(),
        16
    );
    assert_eq!(
        swapped.board(Player::Black).score_absolute_difference(),
        -16
    );
    assert_eq!(
        position.board(Player::White).score_absolute_difference(),
        swapped.board(Player::Black).score_absolute_difference()
    );
    assert_eq!(position.color_at(Location::from_index(0)), Color::Black);
}
