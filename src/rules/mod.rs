/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Narrowing of candidate moves by pins and checks.
mod legality;

/// Candidate move generation for every piece variant.
mod movegen;

/// Directional scans from a cell.
mod ray;

/// Attacks on a King.
mod threat;

pub use legality::*;
pub use movegen::*;
pub use ray::*;
pub use threat::*;
