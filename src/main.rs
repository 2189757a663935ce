/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{io, process::ExitCode};

use clap::Parser;
use fchess::{Cli, Engine, Game};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with command output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(cli.log_level())
        .with_target(false)
        .init();

    let config = cli.config();
    let game = match cli.placements.as_deref() {
        Some(placements) => match Game::from_placements(placements, config) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("Invalid placements: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Game::new(config),
    };

    let mut engine = Engine::new(game);
    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
