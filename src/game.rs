/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};
use tracing::debug;

use crate::{calculate_moves, threat_on, Board, Cell, CellSet, Color, MoveSets, PieceId, RulesConfig, Threat};

/// A [`Board`] played under a [`RulesConfig`].
///
/// This is the entry point for a presentation layer: it computes the legal moves of a piece, stores them on the piece
/// for later reading, and executes chosen moves back into the board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    board: Board,
    config: RulesConfig,
    side_to_move: Color,
}

impl Game {
    /// Creates a new [`Game`] in the starting position for the configured orientation.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Color, Game, RulesConfig};
    /// let game = Game::new(RulesConfig::default());
    /// assert_eq!(game.board().alive_count(), 32);
    /// assert_eq!(game.side_to_move(), Color::White);
    /// ```
    pub fn new(config: RulesConfig) -> Self {
        Self::with_board(Board::starting(config.orientation), config)
    }

    /// Wraps an existing [`Board`]. The board's orientation takes precedence over the one in `config`.
    pub fn with_board(board: Board, config: RulesConfig) -> Self {
        Self {
            config: config.with_orientation(board.orientation()),
            board,
            side_to_move: Color::White,
        }
    }

    /// Creates a [`Game`] from a placement string. See [`Board::from_placements`].
    pub fn from_placements(placements: &str, config: RulesConfig) -> Result<Self> {
        let board = Board::from_placements(placements, config.orientation)?;
        Ok(Self::with_board(board, config))
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the board, for editing the position.
    #[inline(always)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline(always)]
    pub const fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Passes the turn to the other side.
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Computes the legal moves of `piece`, stores them on the piece, and returns them.
    pub fn calculate_moves(&mut self, piece: PieceId) -> &MoveSets {
        let moves = calculate_moves(&self.board, piece, &self.config);
        self.board.piece_mut(piece).set_moves(moves);
        self.board.piece(piece).moves()
    }

    /// Computes and stores the legal moves of every piece on the board.
    pub fn calculate_all_moves(&mut self) {
        let placed = Color::all()
            .into_iter()
            .flat_map(|color| self.board.placed_pieces(color))
            .collect::<Vec<_>>();

        for piece in placed {
            self.calculate_moves(piece);
        }
    }

    /// Returns `true` if any enemy attacks `king`.
    #[inline(always)]
    pub fn is_checked(&self, king: PieceId) -> bool {
        crate::is_checked(&self.board, king)
    }

    /// The enemies attacking `king`, if any.
    #[inline(always)]
    pub fn threat_on(&self, king: PieceId) -> Option<Threat> {
        threat_on(&self.board, king)
    }

    /// The subset of the stored available moves of `piece` that capture an enemy.
    #[inline(always)]
    pub fn captures(&self, piece: PieceId) -> CellSet {
        self.board.piece(piece).available_moves() & self.board.occupancy()
    }

    /// Moves `piece` to `destination`, returning the captured piece, if any.
    ///
    /// The move is only executed if `destination` is among the piece's freshly calculated available moves.
    /// A rejected move leaves the game untouched.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Cell, Game, RulesConfig};
    /// let mut game = Game::new(RulesConfig::default());
    /// let knight = game.board().piece_at(Cell::new(0, 1).unwrap()).unwrap();
    ///
    /// assert!(game.apply_move(knight, Cell::new(2, 2).unwrap()).is_ok());
    /// assert!(game.apply_move(knight, Cell::new(7, 7).unwrap()).is_err());
    /// ```
    pub fn apply_move(&mut self, piece: PieceId, destination: Cell) -> Result<Option<PieceId>> {
        let from = self
            .validate_move(piece, destination)
            .inspect_err(|err| debug!("Rejected move: {err}"))?;

        let captured = self.board.relocate(piece, destination);
        self.board.piece_mut(piece).set_has_moved(true);
        self.toggle_side_to_move();

        let mover = self.board.piece(piece);
        match captured {
            Some(captured) => debug!(
                "{mover} {piece} moved {from} -> {destination}, capturing {} {captured}",
                self.board.piece(captured)
            ),
            None => debug!("{mover} {piece} moved {from} -> {destination}"),
        }

        Ok(captured)
    }

    /// Checks that `piece` may move to `destination`, returning the cell it moves from.
    fn validate_move(&self, piece: PieceId, destination: Cell) -> Result<Cell> {
        let this = self.board.piece(piece);
        if !this.is_alive() {
            bail!("Cannot move {this} {piece}: it has been captured");
        }

        let Some(from) = self.board.cell_of(piece) else {
            bail!("Cannot move {this} {piece}: it is not on the board");
        };

        if self.config.enforce_turns && this.color() != self.side_to_move {
            bail!(
                "Cannot move {this} on {from}: it is {}'s turn",
                self.side_to_move
            );
        }

        let moves = calculate_moves(&self.board, piece, &self.config);
        if !moves.available.contains(destination) {
            bail!("Cannot move {this} from {from} to {destination}: it is not an available move");
        }

        Ok(from)
    }

    /// Restores the starting position, keeping the current config.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\nSide to move: {}\nPlacements: {}",
            self.board,
            self.side_to_move,
            self.board.to_placements()
        )
    }
}
