/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{cast, land, Board, Cell, Color, Direction, MoveSets, PieceId, PieceKind, RayRule};

/// Longest ray on the board; enough for any line piece to reach the far edge.
pub const UNBOUNDED: u8 = 8;

/// How a piece variant moves.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Movement {
    /// Rays cast in each of `directions`, up to `max_steps` cells long.
    Rays {
        directions: &'static [Direction],
        max_steps: u8,
    },

    /// Knight jumps: two cells along an orthogonal direction, then one to either side.
    Jumps,

    /// Pawn pushes and diagonal captures.
    Pawn,
}

impl PieceKind {
    /// The movement policy of this variant.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Movement, PieceKind};
    /// assert!(matches!(PieceKind::King.movement(), Movement::Rays { max_steps: 1, .. }));
    /// assert_eq!(PieceKind::Knight.movement(), Movement::Jumps);
    /// ```
    #[inline(always)]
    pub const fn movement(&self) -> Movement {
        match self {
            Self::King => Movement::Rays {
                directions: &Direction::ALL,
                max_steps: 1,
            },
            Self::Queen => Movement::Rays {
                directions: &Direction::ALL,
                max_steps: UNBOUNDED,
            },
            Self::Rook => Movement::Rays {
                directions: &Direction::ORTHOGONAL,
                max_steps: UNBOUNDED,
            },
            Self::Bishop => Movement::Rays {
                directions: &Direction::DIAGONAL,
                max_steps: UNBOUNDED,
            },
            Self::Knight => Movement::Jumps,
            Self::Pawn => Movement::Pawn,
        }
    }
}

/// Generates every cell the piece `id` reaches under its variant's movement rules, ignoring pins and checks.
///
/// This is a full recompute from the current board; a piece that is not on the board reaches nothing.
pub fn pseudo_moves(board: &Board, id: PieceId) -> MoveSets {
    let mut moves = MoveSets::EMPTY;
    let Some(origin) = board.cell_of(id) else {
        return moves;
    };

    let piece = board.piece(id);
    let color = piece.color();

    match piece.kind().movement() {
        Movement::Rays {
            directions,
            max_steps,
        } => {
            for &direction in directions {
                cast(board, origin, color, direction, max_steps, RayRule::SLIDE, &mut moves);
            }
        }

        Movement::Jumps => knight_jumps(board, origin, color, &mut moves),

        Movement::Pawn => {
            let forward = Direction::forward(board.orientation(), color);
            let steps = if piece.has_moved() { 1 } else { 2 };
            cast(board, origin, color, forward, steps, RayRule::PAWN_PUSH, &mut moves);

            for diagonal in pawn_diagonals(forward) {
                cast(board, origin, color, diagonal, 1, RayRule::PAWN_CAPTURE, &mut moves);
            }
        }
    }

    moves
}

/// The cells a Knight on `origin` jumps to, classified like the end of a ray.
fn knight_jumps(board: &Board, origin: Cell, color: Color, moves: &mut MoveSets) {
    for direction in Direction::ORTHOGONAL {
        let (rows, columns) = direction.delta();

        for side in [-1, 1] {
            // Two cells along the direction, one cell across it
            let target = if rows != 0 {
                origin.offset(rows * 2, side)
            } else {
                origin.offset(side, columns * 2)
            };

            if let Some(cell) = target {
                land(board, cell, color, RayRule::SLIDE, moves);
            }
        }
    }
}

/// The two diagonals a Pawn advancing in `forward` captures along.
#[inline(always)]
const fn pawn_diagonals(forward: Direction) -> [Direction; 2] {
    match forward {
        Direction::North => [Direction::NorthEast, Direction::NorthWest],
        _ => [Direction::SouthEast, Direction::SouthWest],
    }
}
