/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Property-based tests over randomly populated boards.

use fchess::{
    calculate_moves, is_checked, is_safe_to_move, pseudo_moves, Board, Cell, Color, MoveSets,
    Orientation, Piece, PieceKind, PinPolicy, RulesConfig,
};
use proptest::prelude::*;

const PIECE_CHARS: [char; 12] = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];

/// Strategy to generate a board with up to 24 pieces and at most one King per color.
fn board_strategy() -> impl Strategy<Value = Board> {
    (
        prop::collection::vec((0..Cell::COUNT, 0..PIECE_CHARS.len()), 0..24),
        any::<bool>(),
    )
        .prop_map(|(placements, white_bottom)| {
            let orientation = if white_bottom {
                Orientation::WhiteBottom
            } else {
                Orientation::WhiteTop
            };

            let mut board = Board::new(orientation);
            for (index, piece) in placements {
                let piece = Piece::from_char(PIECE_CHARS[piece]).unwrap();
                if piece.kind() == PieceKind::King && board.king(piece.color()).is_some() {
                    continue;
                }

                // Occupied cells are skipped
                let _ = board.place(piece, Cell::from_index_unchecked(index));
            }
            board
        })
}

fn config_strategy() -> impl Strategy<Value = RulesConfig> {
    prop_oneof![Just(PinPolicy::Freeze), Just(PinPolicy::AlongLine)]
        .prop_map(|pin_policy| RulesConfig::default().with_pin_policy(pin_policy))
}

fn placed(board: &Board) -> Vec<fchess::PieceId> {
    Color::all()
        .into_iter()
        .flat_map(|color| board.placed_pieces(color))
        .collect()
}

proptest! {
    /// Property: legal moves never exceed candidate moves, and every set matches the occupancy it claims
    #[test]
    fn prop_containment(board in board_strategy(), config in config_strategy()) {
        for id in placed(&board) {
            let color = board.piece(id).color();
            let legal = calculate_moves(&board, id, &config);
            let candidates = pseudo_moves(&board, id);

            prop_assert!(candidates.available.is_superset(legal.available));
            prop_assert!(!legal.available.intersects(board.occupancy_of(color)));
            prop_assert!(board.occupancy_of(color).is_superset(candidates.blocked));
            prop_assert!(!candidates.potential.intersects(board.occupancy()));
        }
    }

    /// Property: every reached cell lies on the piece's movement pattern, so no ray wraps around an edge
    #[test]
    fn prop_edge_safety(board in board_strategy()) {
        for id in placed(&board) {
            let origin = board.cell_of(id).unwrap();
            let moves = pseudo_moves(&board, id);

            for cell in moves.available | moves.blocked | moves.potential {
                let rows = origin.distance_rows(cell);
                let columns = origin.distance_columns(cell);
                prop_assert_ne!(cell, origin);

                match board.piece(id).kind() {
                    PieceKind::Knight => prop_assert!(
                        (rows, columns) == (1, 2) || (rows, columns) == (2, 1),
                        "Knight jump {origin} -> {cell}"
                    ),
                    PieceKind::King => prop_assert!(rows <= 1 && columns <= 1),
                    PieceKind::Pawn => prop_assert!(rows <= 2 && columns <= 1),
                    _ => prop_assert!(
                        rows == 0 || columns == 0 || rows == columns,
                        "Ray {origin} -> {cell} is not a straight line"
                    ),
                }
            }
        }
    }

    /// Property: calculating moves twice yields the same result and never touches the board
    #[test]
    fn prop_idempotence(board in board_strategy(), config in config_strategy()) {
        let before = board.clone();

        for id in placed(&board) {
            let first = calculate_moves(&board, id, &config);
            let second = calculate_moves(&board, id, &config);
            prop_assert_eq!(first, second);
        }

        prop_assert_eq!(board, before);
    }

    /// Property: no legal move leaves the mover's own King attacked
    #[test]
    fn prop_check_escape_soundness(board in board_strategy(), config in config_strategy()) {
        for id in placed(&board) {
            let Some(king) = board.king(board.piece(id).color()) else {
                continue;
            };

            let from = board.cell_of(id).unwrap();
            for to in calculate_moves(&board, id, &config).available {
                let after = board.with_relocation(from, to);
                prop_assert!(
                    !is_checked(&after, king),
                    "{} {from} -> {to} exposes its King\n{board}",
                    board.piece(id)
                );
            }
        }
    }

    /// Property: under the freezing pin policy, a piece that cannot safely leave its cell has no moves at all
    #[test]
    fn prop_pin_correctness(board in board_strategy()) {
        let config = RulesConfig::default().with_pin_policy(PinPolicy::Freeze);

        for id in placed(&board) {
            let piece = board.piece(id);
            if piece.kind() == PieceKind::King {
                continue;
            }
            let Some(king) = board.king(piece.color()) else {
                continue;
            };

            if !is_safe_to_move(&board, id, king) {
                prop_assert_eq!(
                    calculate_moves(&board, id, &config),
                    MoveSets::EMPTY,
                    "pinned {} on {} still moves\n{}",
                    piece,
                    board.cell_of(id).unwrap(),
                    board
                );
            }
        }
    }
}
