/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Cells, pieces, and the board that holds them.
mod board;

/// Command-line options and interactive commands.
mod cli;

/// Tunable behavior of the rules engine.
mod config;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// A board played under a set of rules.
mod game;

/// Move generation, threat analysis, and legality.
mod rules;

pub use board::*;
pub use cli::*;
pub use config::*;
pub use engine::*;
pub use game::*;
pub use rules::*;
