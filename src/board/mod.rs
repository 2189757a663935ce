/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Addressing of the 64 cells.
mod cell;

/// Sets of cells, stored as 64-bit masks.
mod cellset;

/// The board itself: occupancy, piece records and the players that own them.
mod grid;

/// Move sets computed for a piece.
mod moves;

/// Colors, piece variants and piece records.
mod piece;

pub use cell::*;
pub use cellset::*;
pub use grid::*;
pub use moves::*;
pub use piece::*;
