/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Board, Cell, Color, MoveSets, Orientation, PieceKind};

/// One of the eight directions a ray can be cast in.
///
/// North points toward row `0`, West toward column `0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All eight directions, orthogonals first.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// The four directions along rows and columns.
    pub const ORTHOGONAL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The four diagonal directions.
    pub const DIAGONAL: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Row and column offsets of a single step in this direction.
    #[inline(always)]
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
            Self::NorthEast => (-1, 1),
            Self::NorthWest => (-1, -1),
            Self::SouthEast => (1, 1),
            Self::SouthWest => (1, -1),
        }
    }

    #[inline(always)]
    pub const fn is_diagonal(&self) -> bool {
        let (rows, columns) = self.delta();
        rows != 0 && columns != 0
    }

    /// Number of steps that can be taken from `cell` in this direction before leaving the board.
    ///
    /// Rays are bounded by this distance rather than by index arithmetic, so a ray never wraps onto another row.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Cell, Direction};
    /// let cell = Cell::new(1, 6).unwrap();
    /// assert_eq!(Direction::North.distance_to_edge(cell), 1);
    /// assert_eq!(Direction::East.distance_to_edge(cell), 1);
    /// assert_eq!(Direction::SouthWest.distance_to_edge(cell), 6);
    /// ```
    #[inline(always)]
    pub const fn distance_to_edge(&self, cell: Cell) -> u8 {
        let north = cell.row();
        let south = 7 - cell.row();
        let east = 7 - cell.column();
        let west = cell.column();

        const fn min(a: u8, b: u8) -> u8 {
            if a < b {
                a
            } else {
                b
            }
        }

        match self {
            Self::North => north,
            Self::South => south,
            Self::East => east,
            Self::West => west,
            Self::NorthEast => min(north, east),
            Self::NorthWest => min(north, west),
            Self::SouthEast => min(south, east),
            Self::SouthWest => min(south, west),
        }
    }

    /// The direction `color`'s Pawns advance in, given the board orientation.
    #[inline(always)]
    pub const fn forward(orientation: Orientation, color: Color) -> Self {
        if orientation.forward(color) > 0 {
            Self::South
        } else {
            Self::North
        }
    }

    /// The cell `steps` steps from `cell` in this direction, if it is on the board.
    #[inline(always)]
    pub const fn walk(&self, cell: Cell, steps: u8) -> Option<Cell> {
        let (rows, columns) = self.delta();
        cell.offset(rows * steps as i8, columns * steps as i8)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Where an empty landing cell is recorded by a ray.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EmptyCell {
    /// The cell is an available move and the ray continues past it.
    Move,

    /// The cell is only threatened: it is recorded as a potential move and the ray stops.
    Threat,
}

/// The landing rules a ray follows.
///
/// Every piece casts rays with the same primitive; the differences between piece variants are expressed by the rule they cast with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RayRule {
    /// Treatment of empty cells.
    pub empty: EmptyCell,

    /// Whether the ray strikes occupied cells: capturing enemies and guarding friends.
    ///
    /// A ray that does not strike stops silently at the first occupied cell.
    pub strikes: bool,
}

impl RayRule {
    /// Lines of Kings, Queens, Rooks and Bishops, and the jumps of Knights.
    pub const SLIDE: Self = Self {
        empty: EmptyCell::Move,
        strikes: true,
    };

    /// A Pawn walking straight ahead: never captures.
    pub const PAWN_PUSH: Self = Self {
        empty: EmptyCell::Move,
        strikes: false,
    };

    /// A Pawn's diagonal: threatens empty cells, captures enemies.
    pub const PAWN_CAPTURE: Self = Self {
        empty: EmptyCell::Threat,
        strikes: true,
    };
}

/// Casts a ray from `origin` in `direction` for at most `max_steps` steps, recording every landing cell in `moves`.
///
/// `color` is the color of the piece casting the ray. The ray stops at the board edge or at the first occupied cell.
/// If it strikes the enemy King, the King is recorded in [`MoveSets::checks`].
pub fn cast(
    board: &Board,
    origin: Cell,
    color: Color,
    direction: Direction,
    max_steps: u8,
    rule: RayRule,
    moves: &mut MoveSets,
) {
    let limit = direction.distance_to_edge(origin).min(max_steps);

    for step in 1..=limit {
        let Some(cell) = direction.walk(origin, step) else {
            break;
        };

        if !land(board, cell, color, rule, moves) {
            break;
        }
    }
}

/// Records a single landing on `cell` for a piece of `color`, returning `true` if a ray may continue past it.
///
/// Also used on its own for the Knight, whose jumps are not blocked by pieces in between.
pub fn land(board: &Board, cell: Cell, color: Color, rule: RayRule, moves: &mut MoveSets) -> bool {
    match board.occupant(cell) {
        None => match rule.empty {
            EmptyCell::Move => {
                moves.available.insert(cell);
                true
            }
            EmptyCell::Threat => {
                moves.potential.insert(cell);
                false
            }
        },

        Some(_) if !rule.strikes => false,

        Some(occupant) if occupant.color() != color => {
            moves.available.insert(cell);
            if occupant.kind() == PieceKind::King {
                moves.checks = board.piece_at(cell);
            }
            false
        }

        Some(_) => {
            moves.blocked.insert(cell);
            false
        }
    }
}
