/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{CellSet, PieceId, PieceKind};

/// The cells a piece can reach, split by how it reaches them.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveSets {
    /// Cells the piece may move to: empty cells and cells holding an enemy (captures).
    pub available: CellSet,

    /// Cells holding a friendly piece that the piece reaches but cannot move to.
    ///
    /// The piece still guards these, so an enemy King may not capture on them.
    pub blocked: CellSet,

    /// Pawns only: empty diagonal cells the Pawn threatens but cannot move to.
    pub potential: CellSet,

    /// The enemy King that one of the available moves lands on, if any.
    pub checks: Option<PieceId>,
}

impl MoveSets {
    pub const EMPTY: Self = Self {
        available: CellSet::EMPTY,
        blocked: CellSet::EMPTY,
        potential: CellSet::EMPTY,
        checks: None,
    };

    /// Returns `true` if these moves reach `king`.
    #[inline(always)]
    pub fn attacks(&self, king: PieceId) -> bool {
        self.checks == Some(king)
    }

    /// All cells a piece of variant `kind` with these moves would capture on, were an enemy to stand there.
    ///
    /// Pawns only threaten their diagonals, so their forward moves are excluded.
    #[inline(always)]
    pub fn threatened(&self, kind: PieceKind) -> CellSet {
        if kind == PieceKind::Pawn {
            self.potential | self.blocked
        } else {
            self.available | self.blocked
        }
    }

    /// Removes every cell in `cells` from the available moves.
    #[inline(always)]
    pub fn disregard(&mut self, cells: CellSet) {
        self.available.remove(cells);
    }
}

impl fmt::Debug for MoveSets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveSets")
            .field("available", &self.available)
            .field("blocked", &self.blocked)
            .field("potential", &self.potential)
            .field("checks", &self.checks)
            .finish()
    }
}
