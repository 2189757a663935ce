/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{pseudo_moves, Board, CellSet, Color, MoveSets, PieceId, PieceKind};

/// The enemy pieces attacking a King.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Threat {
    /// The first enemy found attacking the King.
    pub threatening_piece: PieceId,

    /// Every enemy attacking the King, `threatening_piece` included.
    pub checkers: Vec<PieceId>,
}

impl Threat {
    /// Returns `true` if more than one enemy attacks the King.
    #[inline(always)]
    pub fn is_double(&self) -> bool {
        self.checkers.len() > 1
    }
}

/// All pieces on the board that are enemies of `color`.
///
/// # Example
/// ```
/// # use fchess::{find_all_enemies, Board, Color, Orientation};
/// let board = Board::starting(Orientation::WhiteTop);
/// assert_eq!(find_all_enemies(&board, Color::White).len(), 16);
/// ```
pub fn find_all_enemies(board: &Board, color: Color) -> Vec<PieceId> {
    board.placed_pieces(color.opponent()).collect()
}

/// Finds every enemy whose moves currently reach `king`.
///
/// Returns `None` if the King is safe, or is not on the board.
pub fn threat_on(board: &Board, king: PieceId) -> Option<Threat> {
    board.cell_of(king)?;
    let color = board.piece(king).color();

    let checkers = find_all_enemies(board, color)
        .into_iter()
        .filter(|&enemy| pseudo_moves(board, enemy).attacks(king))
        .collect::<Vec<_>>();

    Some(Threat {
        threatening_piece: *checkers.first()?,
        checkers,
    })
}

/// Returns `true` if any enemy attacks `king`.
#[inline(always)]
pub fn is_checked(board: &Board, king: PieceId) -> bool {
    threat_on(board, king).is_some()
}

/// Cells the King would move to that an enemy of variant `enemy_kind` with `enemy_moves` covers.
#[inline(always)]
pub fn encounter(king_moves: &MoveSets, enemy_kind: PieceKind, enemy_moves: &MoveSets) -> CellSet {
    king_moves.available & enemy_moves.threatened(enemy_kind)
}

/// Removes from `moves` every cell on which `king` would be attacked.
///
/// Enemy moves are generated with the King lifted off the board, so a cell behind the King on an attack line counts as
/// attacked.
pub fn avoid_enemies(board: &Board, king: PieceId, moves: &mut MoveSets) {
    let Some(cell) = board.cell_of(king) else {
        return;
    };

    let lifted = board.without(cell);
    let color = board.piece(king).color();

    for enemy in find_all_enemies(&lifted, color) {
        let enemy_moves = pseudo_moves(&lifted, enemy);
        let covered = encounter(moves, lifted.piece(enemy).kind(), &enemy_moves);
        moves.disregard(covered);
    }
}

/// Generates the moves of `king`, leaving out every cell an enemy covers.
pub fn calculate_moves_with_caution(board: &Board, king: PieceId) -> MoveSets {
    let mut moves = pseudo_moves(board, king);
    avoid_enemies(board, king, &mut moves);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Orientation};

    fn cell(row: u8, column: u8) -> Cell {
        Cell::new(row, column).unwrap()
    }

    fn cells(list: &[(u8, u8)]) -> CellSet {
        list.iter().map(|&(r, c)| cell(r, c)).collect()
    }

    fn board(placements: &str) -> Board {
        Board::from_placements(placements, Orientation::WhiteTop).unwrap()
    }

    #[test]
    fn test_rook_checks_along_row() {
        let board = board("R3k3/8/8/8/8/8/8/8");
        let king = board.king(Color::Black).unwrap();
        let rook = board.piece_at(cell(0, 0)).unwrap();

        let threat = threat_on(&board, king).unwrap();
        assert_eq!(threat.threatening_piece, rook);
        assert_eq!(threat.checkers, [rook]);
        assert!(!threat.is_double());
        assert!(is_checked(&board, king));

        // The cell behind the King on the Rook's line is covered too
        let moves = calculate_moves_with_caution(&board, king);
        assert_eq!(moves.available, cells(&[(1, 3), (1, 4), (1, 5)]));
    }

    #[test]
    fn test_no_threat() {
        let board = Board::starting(Orientation::WhiteTop);
        for color in Color::all() {
            let king = board.king(color).unwrap();
            assert_eq!(threat_on(&board, king), None);
        }
    }

    #[test]
    fn test_king_off_board_is_not_checked() {
        let mut board = board("R3k3/8/8/8/8/8/8/8");
        let king = board.take(cell(0, 4)).unwrap();
        assert!(!is_checked(&board, king));
        assert_eq!(calculate_moves_with_caution(&board, king), MoveSets::EMPTY);
    }

    #[test]
    fn test_double_check() {
        // Rook down the file and Knight from (2,3)
        let board = board("4k3/8/3N4/8/8/8/8/4R3");
        let king = board.king(Color::Black).unwrap();

        let threat = threat_on(&board, king).unwrap();
        assert!(threat.is_double());
        assert_eq!(threat.checkers.len(), 2);
    }

    #[test]
    fn test_king_cannot_capture_defended_piece() {
        let board = board("3Rk3/8/8/8/8/8/8/3R4");
        let king = board.king(Color::Black).unwrap();

        let moves = calculate_moves_with_caution(&board, king);
        assert_eq!(moves.available, cells(&[(1, 4), (1, 5)]));
    }

    #[test]
    fn test_pawn_covers_diagonals_only() {
        // White Pawn on (2,4) advances south
        let board = board("8/8/4P3/8/4k3/8/8/8");
        let king = board.king(Color::Black).unwrap();

        let moves = calculate_moves_with_caution(&board, king);
        assert_eq!(
            moves.available,
            cells(&[(3, 4), (4, 3), (4, 5), (5, 3), (5, 4), (5, 5)])
        );
    }

    #[test]
    fn test_kings_keep_apart() {
        let board = board("K7/8/k7/8/8/8/8/8");
        let king = board.king(Color::White).unwrap();

        let moves = calculate_moves_with_caution(&board, king);
        assert_eq!(moves.available, cells(&[(0, 1)]));
    }

    #[test]
    fn test_encounter() {
        let board = board("R3k3/8/8/8/8/8/8/8");
        let king = board.king(Color::Black).unwrap();
        let rook = board.piece_at(cell(0, 0)).unwrap();

        let king_moves = pseudo_moves(&board, king);
        let rook_moves = pseudo_moves(&board, rook);
        assert_eq!(encounter(&king_moves, PieceKind::Rook, &rook_moves), cells(&[(0, 3)]));
    }
}
