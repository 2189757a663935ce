/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, bail, Result};

use crate::Orientation;

use super::{Cell, CellSet, Color, Piece, PieceId, PieceKind, Player};

/// Variants of the major pieces on a back row, from column `0` to column `7`.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The 64 cells of the game board and every piece that has ever stood on them.
///
/// The board owns the piece records; each cell holds a [`PieceId`] handle to its occupant, if any.
/// A piece→cell index is kept alongside the cells, so finding a piece never requires scanning the board.
///
/// Captured pieces are marked dead and lose their cell, but their records (and handles) remain valid.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// Occupant of every cell.
    cells: [Option<PieceId>; Cell::COUNT],

    /// Piece records, indexed by [`PieceId`].
    pieces: Vec<Piece>,

    /// Cell of every piece, indexed by [`PieceId`]. `None` for pieces off the board.
    locations: Vec<Option<Cell>>,

    /// The pieces owned by each side.
    players: [Player; Color::COUNT],

    orientation: Orientation,
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Board, Orientation};
    /// let board = Board::new(Orientation::WhiteTop);
    /// assert_eq!(board.to_placements(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            cells: [None; Cell::COUNT],
            pieces: Vec::with_capacity(32),
            locations: Vec::with_capacity(32),
            players: [Player::new(Color::White), Player::new(Color::Black)],
            orientation,
        }
    }

    /// Creates a [`Board`] set up with the standard starting position for the given orientation.
    ///
    /// Each player owns its pieces in the order: back row from column `0` to `7`, then its eight Pawns.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Board, Orientation};
    /// let board = Board::starting(Orientation::WhiteTop);
    /// assert_eq!(board.to_placements(), "RNBQKBNR/PPPPPPPP/8/8/8/8/pppppppp/rnbqkbnr");
    /// ```
    pub fn starting(orientation: Orientation) -> Self {
        let mut board = Self::new(orientation);

        for color in Color::all() {
            let back_row = orientation.back_row(color);
            for (column, kind) in BACK_ROW.into_iter().enumerate() {
                let cell = Cell::new_unchecked(back_row, column as u8);
                board.put(Piece::new(color, kind), cell);
            }

            let pawn_row = orientation.pawn_row(color);
            for column in 0..Cell::SIDE {
                let cell = Cell::new_unchecked(pawn_row, column);
                board.put(Piece::new(color, PieceKind::Pawn), cell);
            }
        }

        board
    }

    /// Constructs a [`Board`] from a placement string.
    ///
    /// The string lists the rows from row `0` to row `7`, separated by `/`.
    /// Uppercase letters are White pieces, lowercase letters are Black pieces, and digits are runs of empty cells.
    /// Pawns standing anywhere but their starting row are considered to have moved.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Board, Cell, Orientation, PieceKind};
    /// let board = Board::from_placements("4K3/8/8/8/8/8/8/r7", Orientation::WhiteTop).unwrap();
    /// let king = board.piece_at(Cell::new(0, 4).unwrap()).unwrap();
    /// assert_eq!(board.piece(king).kind(), PieceKind::King);
    /// assert!(Board::from_placements("8/8", Orientation::WhiteTop).is_err());
    /// ```
    pub fn from_placements(placements: &str, orientation: Orientation) -> Result<Self> {
        let mut board = Self::new(orientation);
        let placements = placements.trim();

        if placements.matches('/').count() != 7 {
            bail!("Placements must describe all 8 rows. Got {placements:?}");
        }

        for (row, row_placements) in placements.split('/').enumerate() {
            let row = row as u8;
            let mut column = 0;

            for c in row_placements.chars() {
                if let Some(empty) = c.to_digit(10) {
                    column += empty as u8;
                    if column > Cell::SIDE {
                        bail!("Row {row} of {placements:?} has more than 8 cells");
                    }
                } else {
                    let mut piece = Piece::from_char(c).map_err(|_| {
                        anyhow!("Placements must contain piece chars or digits. Got {c:?}")
                    })?;

                    let cell = Cell::new(row, column)
                        .map_err(|_| anyhow!("Row {row} of {placements:?} has more than 8 cells"))?;

                    if piece.kind() == PieceKind::Pawn {
                        piece.set_has_moved(row != orientation.pawn_row(piece.color()));
                    }

                    board.put(piece, cell);
                    column += 1;
                }
            }

            if column != Cell::SIDE {
                bail!("Row {row} of {placements:?} must describe exactly 8 cells. Got {column}");
            }
        }

        Ok(board)
    }

    /// Generates the placement string for the current occupancy of this [`Board`].
    ///
    /// See [`Board::from_placements`] for the format.
    pub fn to_placements(&self) -> String {
        let mut placements = String::with_capacity(72);

        for row in 0..Cell::SIDE {
            let mut empty = 0;

            for column in 0..Cell::SIDE {
                let cell = Cell::new_unchecked(row, column);
                if let Some(piece) = self.occupant(cell) {
                    if empty > 0 {
                        placements += &empty.to_string();
                        empty = 0;
                    }
                    placements.push(piece.char());
                } else {
                    empty += 1;
                }
            }

            if empty > 0 {
                placements += &empty.to_string();
            }
            if row != Cell::SIDE - 1 {
                placements.push('/');
            }
        }

        placements
    }

    #[inline(always)]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Fetches the record of the piece with the provided handle.
    ///
    /// # Panics
    ///
    /// If `id` was not issued by this board.
    #[inline(always)]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    #[inline(always)]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// Iterates over every piece record on this board, dead or alive.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, piece)| (PieceId(i as u32), piece))
    }

    /// Fetches the [`Player`] of the provided color.
    #[inline(always)]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color]
    }

    /// Handle of the piece on `cell`, if any.
    #[inline(always)]
    pub fn piece_at(&self, cell: Cell) -> Option<PieceId> {
        self.cells[cell]
    }

    /// Record of the piece on `cell`, if any.
    #[inline(always)]
    pub fn occupant(&self, cell: Cell) -> Option<&Piece> {
        self.piece_at(cell).map(|id| self.piece(id))
    }

    /// Returns `true` if no piece stands on `cell`.
    #[inline(always)]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.cells[cell].is_none()
    }

    /// Color of the piece on `cell`, if any.
    #[inline(always)]
    pub fn color_at(&self, cell: Cell) -> Option<Color> {
        self.occupant(cell).map(Piece::color)
    }

    /// Returns `true` if `cell` holds a piece that is an enemy of `color`.
    ///
    /// This is what a renderer uses to tell a capture from a quiet move.
    #[inline(always)]
    pub fn contains_enemy(&self, cell: Cell, color: Color) -> bool {
        self.color_at(cell).is_some_and(|c| c != color)
    }

    /// The cell the provided piece stands on, or `None` if it is not on the board.
    #[inline(always)]
    pub fn cell_of(&self, id: PieceId) -> Option<Cell> {
        self.locations[id.index()]
    }

    /// All occupied cells.
    pub fn occupancy(&self) -> CellSet {
        Cell::iter().filter(|&cell| !self.is_empty(cell)).collect()
    }

    /// All cells occupied by pieces of `color`.
    pub fn occupancy_of(&self, color: Color) -> CellSet {
        Cell::iter()
            .filter(|&cell| self.color_at(cell) == Some(color))
            .collect()
    }

    /// The King of `color` currently on the board, if there is one.
    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.players[color].pieces().iter().copied().find(|&id| {
            self.piece(id).kind() == PieceKind::King && self.cell_of(id).is_some()
        })
    }

    /// Pieces of `color` currently standing on the board.
    pub fn placed_pieces(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.players[color]
            .pieces()
            .iter()
            .copied()
            .filter(|&id| self.cell_of(id).is_some())
    }

    /// Number of pieces that are still alive.
    pub fn alive_count(&self) -> usize {
        self.pieces.iter().filter(|piece| piece.is_alive()).count()
    }

    /// Creates a new piece record and places it on `cell`, returning its handle.
    ///
    /// Fails if `cell` is already occupied, or if the board has issued every available [`PieceId`].
    ///
    /// # Example
    /// ```
    /// # use fchess::{Board, Cell, Orientation, Piece};
    /// let mut board = Board::new(Orientation::WhiteTop);
    /// let cell = Cell::new(4, 2).unwrap();
    /// board.place(Piece::from_char('N').unwrap(), cell).unwrap();
    /// assert_eq!(board.to_placements(), "8/8/8/8/2N5/8/8/8");
    /// assert!(board.place(Piece::from_char('n').unwrap(), cell).is_err());
    /// ```
    pub fn place(&mut self, piece: Piece, cell: Cell) -> Result<PieceId> {
        if let Some(occupant) = self.occupant(cell) {
            bail!("Cannot place {piece} on {cell}: it is occupied by a {occupant}");
        }
        if self.pieces.len() >= PieceId::CAPACITY {
            bail!("Cannot place {piece} on {cell}: this board has no piece handles left");
        }

        let id = self.put(piece, cell);
        self.debug_assert_consistent();
        Ok(id)
    }

    /// Removes the piece on `cell` from the board, marking it dead, and returns its handle.
    ///
    /// The piece record is kept so it may be revived later.
    pub fn take(&mut self, cell: Cell) -> Option<PieceId> {
        let id = self.piece_at(cell)?;
        self.kill(id);
        Some(id)
    }

    /// Marks a piece as dead and removes it from the board.
    pub fn kill(&mut self, id: PieceId) {
        if let Some(cell) = self.cell_of(id) {
            self.set_cell(cell, None);
        }
        self.locations[id.index()] = None;
        self.piece_mut(id).kill();
        self.debug_assert_consistent();
    }

    /// Brings a dead piece back to life on the provided empty cell.
    pub fn revive(&mut self, id: PieceId, cell: Cell) -> Result<()> {
        let piece = self.piece(id);
        if piece.is_alive() {
            bail!("Cannot revive {piece} {id}: it is still alive");
        }
        if let Some(occupant) = self.occupant(cell) {
            bail!("Cannot revive {piece} {id} on {cell}: it is occupied by a {occupant}");
        }

        self.piece_mut(id).revive();
        self.set_cell(cell, Some(id));
        self.debug_assert_consistent();
        Ok(())
    }

    /// Removes every piece, living or dead, from this board.
    pub fn clear_all(&mut self) {
        *self = Self::new(self.orientation);
    }

    /// Moves the piece `id` onto `to`, killing whatever stood there, and returns the captured piece.
    ///
    /// No rules are checked here.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Cell) -> Option<PieceId> {
        let captured = self.piece_at(to).filter(|&occupant| occupant != id);
        if let Some(captured) = captured {
            self.kill(captured);
        }

        if let Some(from) = self.cell_of(id) {
            self.set_cell(from, None);
        }
        self.set_cell(to, Some(id));
        self.debug_assert_consistent();

        captured
    }

    /// Returns a copy of this board with `cell` vacated.
    ///
    /// The lifted piece stays alive but has no cell on the copy. Used to test what would happen if a piece left its cell.
    pub fn without(&self, cell: Cell) -> Self {
        let mut board = self.clone();
        if let Some(id) = board.piece_at(cell) {
            board.locations[id.index()] = None;
            board.cells[cell] = None;
        }
        board
    }

    /// Returns a copy of this board on which the piece standing on `from` has moved to `to`.
    ///
    /// Any piece on `to` is taken off the copy. Used to try hypothetical moves without touching the live board.
    pub fn with_relocation(&self, from: Cell, to: Cell) -> Self {
        let mut board = self.without(to);
        if let Some(id) = board.piece_at(from) {
            board.set_cell(from, None);
            board.set_cell(to, Some(id));
        }
        board
    }

    /// Appends a new piece record, placing it on an empty `cell`.
    fn put(&mut self, piece: Piece, cell: Cell) -> PieceId {
        debug_assert!(self.is_empty(cell), "{cell} must be empty to put a piece on it");

        debug_assert!(self.pieces.len() < PieceId::CAPACITY, "piece handles exhausted");

        let id = PieceId(self.pieces.len() as u32);
        self.players[piece.color()].push(id);
        self.pieces.push(piece);
        self.locations.push(None);
        self.set_cell(cell, Some(id));
        id
    }

    /// Sets the occupant of `cell`, keeping the piece→cell index in sync.
    fn set_cell(&mut self, cell: Cell, occupant: Option<PieceId>) {
        if let Some(previous) = self.cells[cell] {
            self.locations[previous.index()] = None;
        }
        if let Some(id) = occupant {
            if let Some(old) = self.locations[id.index()] {
                self.cells[old] = None;
            }
            self.locations[id.index()] = Some(cell);
        }
        self.cells[cell] = occupant;
    }

    /// Checks, in debug builds, that occupancy and the piece→cell index agree and that only living pieces are placed.
    fn debug_assert_consistent(&self) {
        if cfg!(debug_assertions) {
            let occupied = self.cells.iter().flatten().count();
            debug_assert_eq!(
                occupied,
                self.alive_count(),
                "Occupied cells must equal living pieces"
            );

            for cell in Cell::iter() {
                if let Some(id) = self.cells[cell] {
                    debug_assert_eq!(self.locations[id.index()], Some(cell));
                }
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting(Orientation::default())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for cell in Cell::iter() {
            if cell.column() == 0 {
                board += &format!("{}| ", cell.row());
            }

            board.push(self.occupant(cell).map_or('.', Piece::char));
            board.push(if cell.column() == 7 { '\n' } else { ' ' });
        }

        board += " +";
        for _ in 0..Cell::SIDE {
            board += "--";
        }
        board += "\n   ";
        for column in 0..Cell::SIDE {
            board += &format!("{column} ");
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.to_placements(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u8, column: u8) -> Cell {
        Cell::new(row, column).unwrap()
    }

    #[test]
    fn test_starting_layout() {
        let board = Board::starting(Orientation::WhiteTop);
        assert_eq!(board.alive_count(), 32);
        assert_eq!(board.occupancy().len(), 32);

        // White's pieces are created in back-row order, then the Pawns
        let white = board.player(Color::White).pieces();
        assert_eq!(white.len(), 16);
        let kinds = white[..8]
            .iter()
            .map(|&id| board.piece(id).kind())
            .collect::<Vec<_>>();
        assert_eq!(kinds, BACK_ROW);

        // The Black Queen and King stand on columns 3 and 4
        assert_eq!(board.occupant(cell(7, 3)).unwrap().char(), 'q');
        assert_eq!(board.occupant(cell(7, 4)).unwrap().char(), 'k');

        let flipped = Board::starting(Orientation::WhiteBottom);
        assert_eq!(
            flipped.to_placements(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_placements_round_trip() {
        let placements = "r3k2r/p1pp1pb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";
        let board = Board::from_placements(placements, Orientation::WhiteBottom).unwrap();
        assert_eq!(board.to_placements(), placements);
    }

    #[test]
    fn test_placements_errors() {
        assert!(Board::from_placements("8/8/8/8/8/8/8", Orientation::WhiteTop).is_err());
        assert!(Board::from_placements("9/8/8/8/8/8/8/8", Orientation::WhiteTop).is_err());
        assert!(Board::from_placements("7/8/8/8/8/8/8/8", Orientation::WhiteTop).is_err());
        assert!(Board::from_placements("x7/8/8/8/8/8/8/8", Orientation::WhiteTop).is_err());
        assert!(Board::from_placements("54/8/8/8/8/8/8/8", Orientation::WhiteTop).is_err());

        // Digit runs that would overflow a row counter
        let long_row = format!("{}/8/8/8/8/8/8/8", "9".repeat(29));
        assert!(Board::from_placements(&long_row, Orientation::WhiteTop).is_err());
    }

    #[test]
    fn test_pawns_off_home_row_have_moved() {
        let board = Board::from_placements("8/P7/1P6/8/8/8/6p1/7p", Orientation::WhiteTop).unwrap();
        let moved = |row, column| board.occupant(cell(row, column)).unwrap().has_moved();

        assert!(!moved(1, 0));
        assert!(moved(2, 1));
        assert!(!moved(6, 6));
        assert!(moved(7, 7));
    }

    #[test]
    fn test_piece_index_follows_occupancy() {
        let mut board = Board::starting(Orientation::WhiteTop);
        let knight = board.piece_at(cell(0, 1)).unwrap();
        let pawn = board.piece_at(cell(6, 2)).unwrap();

        assert_eq!(board.relocate(knight, cell(2, 2)), None);
        assert_eq!(board.cell_of(knight), Some(cell(2, 2)));
        assert!(board.is_empty(cell(0, 1)));

        // Capturing kills the occupant but keeps its record
        assert_eq!(board.relocate(knight, cell(6, 2)), Some(pawn));
        assert_eq!(board.cell_of(pawn), None);
        assert!(!board.piece(pawn).is_alive());
        assert_eq!(board.player(Color::Black).pieces().len(), 16);
        assert_eq!(board.occupancy().len(), board.alive_count());
    }

    #[test]
    fn test_handles_stay_unique_across_many_records() {
        let mut board = Board::new(Orientation::WhiteTop);
        let rook = board.place(Piece::from_char('R').unwrap(), cell(0, 0)).unwrap();

        // Taken pieces keep their records, so every placement issues a fresh handle
        for _ in 0..300 {
            board.place(Piece::from_char('N').unwrap(), cell(4, 4)).unwrap();
            board.take(cell(4, 4)).unwrap();
        }
        let queen = board.place(Piece::from_char('Q').unwrap(), cell(7, 7)).unwrap();

        assert_eq!(board.pieces().count(), 302);
        assert_ne!(queen, rook);
        assert_eq!(board.cell_of(rook), Some(cell(0, 0)));
        assert_eq!(board.cell_of(queen), Some(cell(7, 7)));
        assert_eq!(board.occupancy().len(), board.alive_count());
        assert_eq!(board.to_placements(), "R7/8/8/8/8/8/8/7Q");
    }

    #[test]
    fn test_take_and_revive() {
        let mut board = Board::starting(Orientation::WhiteTop);
        let queen = board.take(cell(0, 3)).unwrap();
        assert!(!board.piece(queen).is_alive());
        assert_eq!(board.alive_count(), 31);

        // Cannot revive onto an occupied cell, nor revive a living piece
        assert!(board.revive(queen, cell(0, 4)).is_err());
        board.revive(queen, cell(4, 4)).unwrap();
        assert_eq!(board.cell_of(queen), Some(cell(4, 4)));
        assert!(board.revive(queen, cell(4, 5)).is_err());
    }

    #[test]
    fn test_hypothetical_boards_leave_board_untouched() {
        let board = Board::starting(Orientation::WhiteTop);
        let before = board.clone();

        let lifted = board.without(cell(1, 4));
        assert!(lifted.is_empty(cell(1, 4)));

        let moved = board.with_relocation(cell(0, 1), cell(6, 2));
        assert!(moved.is_empty(cell(0, 1)));
        assert_eq!(moved.occupant(cell(6, 2)).unwrap().char(), 'N');

        assert_eq!(board, before);
    }

    #[test]
    fn test_contains_enemy() {
        let board = Board::starting(Orientation::WhiteTop);
        assert!(board.contains_enemy(cell(7, 0), Color::White));
        assert!(!board.contains_enemy(cell(0, 0), Color::White));
        assert!(!board.contains_enemy(cell(4, 4), Color::White));
    }
}
