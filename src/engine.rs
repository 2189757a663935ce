/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use crate::{Cell, CellSet, Color, EngineCommand, Game, Piece};

/// Interactive front end over a [`Game`].
///
/// Reads commands from `stdin`, shows the board and the move affordances of pieces, and executes chosen moves.
#[derive(Debug)]
pub struct Engine {
    /// The game being played.
    ///
    /// Edited by `place` and `take`, and restored by `reset`.
    game: Game,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] over `game`, to be executed with [`Engine::run`].
    pub fn new(game: Game) -> Self {
        let (sender, receiver) = channel();

        Self {
            game,
            sender,
            receiver,
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Sends an [`EngineCommand`] to the engine to be executed.
    pub fn send_command(&self, command: EngineCommand) -> Result<()> {
        self.sender
            .send(command)
            .context("Failed to send command to engine")
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        println!("{} ({})", self.name(), self.game.config());

        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                eprintln!("Input handler thread stopping after fatal error: {err}");
            }
        });

        while let Ok(cmd) = self.receiver.recv() {
            if matches!(cmd, EngineCommand::Exit) {
                break;
            }

            // Keep running, even on error
            if let Err(e) = self.execute(cmd) {
                eprintln!("Error: {e}");
            }
        }

        Ok(())
    }

    /// Executes a single command against the game.
    pub fn execute(&mut self, cmd: EngineCommand) -> Result<()> {
        match cmd {
            EngineCommand::Check { color } => self.check(color)?,

            EngineCommand::Display => println!("{}", self.game),

            EngineCommand::Exit => {}

            EngineCommand::Flip => self.game.toggle_side_to_move(),

            EngineCommand::Move { from, to } => self.make_move(from, to)?,

            EngineCommand::Moves { cell, pretty } => self.moves(cell, pretty)?,

            EngineCommand::Place { piece, cell } => self.place(piece, cell)?,

            EngineCommand::Placements => println!("{}", self.game.board().to_placements()),

            EngineCommand::Reset => self.game.reset(),

            EngineCommand::Take { cell } => {
                let board = self.game.board_mut();
                let id = board
                    .take(cell)
                    .ok_or_else(|| anyhow!("There is no piece on {cell} to take"))?;
                println!("Took {} from {cell}", board.piece(id));
            }
        };

        Ok(())
    }

    /// Executes the `check` command, printing every enemy attacking the King of `color`.
    fn check(&self, color: Color) -> Result<()> {
        let board = self.game.board();
        let Some(king) = board.king(color) else {
            bail!("There is no {color} King on the board");
        };

        let Some(threat) = self.game.threat_on(king) else {
            println!("The {color} King is safe");
            return Ok(());
        };

        let checkers = threat
            .checkers
            .iter()
            .filter_map(|&id| Some(format!("{} on {}", board.piece(id), board.cell_of(id)?)))
            .collect::<Vec<_>>();
        println!("The {color} King is in check by {}", checkers.join(", "));

        Ok(())
    }

    /// Executes the `moves` command, listing the quiet moves, captures and blocked cells of the piece on `cell`.
    fn moves(&mut self, cell: Cell, pretty: bool) -> Result<()> {
        let Some(id) = self.game.board().piece_at(cell) else {
            bail!("There is no piece on {cell}");
        };

        let moves = *self.game.calculate_moves(id);
        let captures = self.game.captures(id);
        let quiet = moves.available & !captures;

        println!("quiet:     {}", cells_string(quiet));
        println!("captures:  {}", cells_string(captures));
        println!("blocked:   {}", cells_string(moves.blocked));
        if moves.potential.is_nonempty() {
            println!("potential: {}", cells_string(moves.potential));
        }

        if pretty {
            print!("\n{}", moves.available);
        }

        Ok(())
    }

    /// Executes the `move` command, moving the piece on `from` to `to` and reporting any new check.
    fn make_move(&mut self, from: Cell, to: Cell) -> Result<()> {
        let Some(id) = self.game.board().piece_at(from) else {
            bail!("There is no piece on {from}");
        };

        if let Some(captured) = self.game.apply_move(id, to)? {
            println!("Captured {}", self.game.board().piece(captured));
        }

        let enemy = self.game.board().piece(id).color().opponent();
        if let Some(king) = self.game.board().king(enemy) {
            if self.game.is_checked(king) {
                println!("The {enemy} King is in check");
            }
        }

        Ok(())
    }

    /// Executes the `place` command, creating `piece` on `cell`.
    fn place(&mut self, piece: Piece, cell: Cell) -> Result<()> {
        self.game.board_mut().place(piece, cell)?;
        println!("Placed {piece} on {cell}");
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Game::default())
    }
}

/// Formats a set of cells as a space-separated list, or `(none)` if it is empty.
fn cells_string(cells: CellSet) -> String {
    if cells.is_empty() {
        String::from("(none)")
    } else {
        cells
            .into_iter()
            .map(|cell| format!("{cell:?}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            return Ok(());
        }

        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match EngineCommand::try_parse_from(buf.split_ascii_whitespace()) {
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RulesConfig;

    fn cell(row: u8, column: u8) -> Cell {
        Cell::new(row, column).unwrap()
    }

    #[test]
    fn test_execute_edits_board() {
        let mut engine = Engine::new(Game::new(RulesConfig::default()));

        engine.execute(EngineCommand::Take { cell: cell(0, 3) }).unwrap();
        assert!(engine.game().board().is_empty(cell(0, 3)));
        assert!(engine.execute(EngineCommand::Take { cell: cell(0, 3) }).is_err());

        let queen = Piece::from_char('q').unwrap();
        engine.execute(EngineCommand::Place { piece: queen, cell: cell(4, 4) }).unwrap();
        assert!(engine.execute(EngineCommand::Place { piece: queen, cell: cell(4, 4) }).is_err());

        engine.execute(EngineCommand::Reset).unwrap();
        assert_eq!(engine.game(), &Game::default());
    }

    #[test]
    fn test_execute_moves() {
        let mut engine = Engine::default();

        engine.execute(EngineCommand::Moves { cell: cell(0, 1), pretty: true }).unwrap();
        engine.execute(EngineCommand::Move { from: cell(0, 1), to: cell(2, 2) }).unwrap();
        assert!(engine.game().board().is_empty(cell(0, 1)));

        assert!(engine.execute(EngineCommand::Move { from: cell(3, 3), to: cell(4, 4) }).is_err());
        assert!(engine.execute(EngineCommand::Moves { cell: cell(3, 3), pretty: false }).is_err());
    }

    #[test]
    fn test_cells_string() {
        assert_eq!(cells_string(CellSet::EMPTY), "(none)");
        let cells = CellSet::from(cell(5, 0)) | cell(5, 2);
        assert_eq!(cells_string(cells), "(5,0) (5,2)");
    }
}
