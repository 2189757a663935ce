/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tracing::trace;

use crate::{
    calculate_moves_with_caution, find_all_enemies, pseudo_moves, threat_on, Board, CellSet,
    MoveSets, PieceId, PieceKind, PinPolicy, RulesConfig, Threat,
};

/// Returns `true` if `piece` can leave its cell without exposing `king` to an enemy line piece.
///
/// Enemies already attacking the King are not counted as pinners.
pub fn is_safe_to_move(board: &Board, piece: PieceId, king: PieceId) -> bool {
    let checkers = threat_on(board, king).map(|threat| threat.checkers).unwrap_or_default();
    pinners(board, piece, king, &checkers).is_empty()
}

/// The enemy line pieces that would attack `king` if `piece` were lifted off the board.
fn pinners(board: &Board, piece: PieceId, king: PieceId, checkers: &[PieceId]) -> Vec<PieceId> {
    let Some(cell) = board.cell_of(piece) else {
        return Vec::new();
    };

    let lifted = board.without(cell);
    let color = board.piece(king).color();

    find_all_enemies(&lifted, color)
        .into_iter()
        .filter(|enemy| !checkers.contains(enemy))
        .filter(|&enemy| lifted.piece(enemy).kind().is_line())
        .filter(|&enemy| pseudo_moves(&lifted, enemy).attacks(king))
        .collect()
}

/// Narrows `moves` of `piece` to those that resolve every check in `threat`.
///
/// A candidate resolves a checker if it captures the checker, or if the checker no longer reaches `king` once the
/// piece stands on the candidate cell.
pub fn find_emergency_moves(
    board: &Board,
    piece: PieceId,
    king: PieceId,
    threat: &Threat,
    moves: &mut MoveSets,
) {
    debug_assert!(
        !threat.checkers.is_empty(),
        "a threat on {king} must have at least one checker"
    );

    let Some(from) = board.cell_of(piece) else {
        *moves = MoveSets::EMPTY;
        return;
    };

    let escapes: CellSet = moves
        .available
        .iter()
        .filter(|&to| {
            let after = board.with_relocation(from, to);
            threat.checkers.iter().all(|&checker| {
                board.cell_of(checker) == Some(to) || !pseudo_moves(&after, checker).attacks(king)
            })
        })
        .collect();

    trace!(
        "{} {piece} escapes check with {:?}",
        board.piece(piece),
        escapes
    );
    moves.available = escapes;
}

/// Keeps only the moves of a pinned `piece` after which none of `pinners` attacks `king`.
fn stay_in_line(board: &Board, piece: PieceId, king: PieceId, pinners: &[PieceId], moves: &mut MoveSets) {
    let Some(from) = board.cell_of(piece) else {
        *moves = MoveSets::EMPTY;
        return;
    };

    moves.available = moves
        .available
        .iter()
        .filter(|&to| {
            let after = board.with_relocation(from, to);
            pinners
                .iter()
                .all(|&pinner| !pseudo_moves(&after, pinner).attacks(king))
        })
        .collect();
}

/// Computes the legal moves of `piece` on `board`.
///
/// Kings avoid every covered cell. Any other piece is first checked for a pin, handled according to
/// [`RulesConfig::pin_policy`], and its moves are then narrowed to check escapes if its King is attacked. With no King
/// of its color on the board, a piece keeps all of its moves.
///
/// # Example
/// ```
/// # use fchess::{calculate_moves, Board, Cell, Orientation, RulesConfig};
/// let board = Board::starting(Orientation::WhiteTop);
/// let knight = board.piece_at(Cell::new(7, 1).unwrap()).unwrap();
/// let moves = calculate_moves(&board, knight, &RulesConfig::default());
/// assert_eq!(moves.available.len(), 2);
/// ```
pub fn calculate_moves(board: &Board, piece: PieceId, config: &RulesConfig) -> MoveSets {
    let this = board.piece(piece);
    if this.kind() == PieceKind::King {
        return calculate_moves_with_caution(board, piece);
    }

    let mut moves = pseudo_moves(board, piece);
    let Some(king) = board.king(this.color()) else {
        return moves;
    };

    let threat = threat_on(board, king);
    let checkers = threat.as_ref().map_or(&[][..], |threat| threat.checkers.as_slice());

    let pinners = pinners(board, piece, king, checkers);
    if !pinners.is_empty() {
        trace!("{this} {piece} is pinned by {pinners:?}");

        match config.pin_policy {
            PinPolicy::Freeze => return MoveSets::EMPTY,
            PinPolicy::AlongLine => stay_in_line(board, piece, king, &pinners, &mut moves),
        }
    }

    if let Some(threat) = &threat {
        find_emergency_moves(board, piece, king, threat, &mut moves);
    }

    moves
}
