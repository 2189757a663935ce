/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::{CellSet, MoveSets};

/// Represents the color of a player or piece.
///
/// White traditionally moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Color`]'s opposite / enemy.
    ///
    /// # Example
    /// ```
    /// # use fchess::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`, `0` for White and `1` for Black.
    ///
    /// Useful for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("Invalid Color string: expected `white` or `black`. Got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

/// The variant (or "role") of a chess piece.
///
/// These have no [`Color`] associated with them. See [`Piece`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// Returns `true` for the pieces that attack along unbounded lines: Bishops, Rooks and Queens.
    ///
    /// Only these can pin a piece, since removing an intervening piece never extends a Knight's, Pawn's or King's reach.
    #[inline(always)]
    pub const fn is_line(&self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }

    /// Creates a new [`PieceKind`] from a character, case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use fchess::PieceKind;
    /// assert_eq!(PieceKind::from_char('N').unwrap(), PieceKind::Knight);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind}."),
        }
    }

    /// Converts this [`PieceKind`] to a lowercase character.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Handle to a [`Piece`] owned by a [`crate::Board`].
///
/// Handles stay valid for the lifetime of the board, even after the piece is captured.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(transparent)]
pub struct PieceId(pub(crate) u32);

impl PieceId {
    /// Number of distinct handles a single board can issue.
    pub const CAPACITY: usize = u32::MAX as usize;

    /// Returns this [`PieceId`] as a `usize`, for indexing into the board's piece records.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A chess piece and its rules state.
///
/// Besides its color and variant, a piece remembers whether it is still alive, whether it has moved,
/// and the [`MoveSets`] computed for it the last time its moves were calculated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    alive: bool,

    /// Gates the Pawn's two-step opening move.
    has_moved: bool,

    moves: MoveSets,
}

impl Piece {
    /// Creates a new, living, unmoved [`Piece`].
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            alive: true,
            has_moved: false,
            moves: MoveSets::EMPTY,
        }
    }

    /// Creates a new [`Piece`] from a character, where uppercase letters are White and lowercase letters are Black.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Color, Piece, PieceKind};
    /// let queen = Piece::from_char('q').unwrap();
    /// assert_eq!(queen.color(), Color::Black);
    /// assert_eq!(queen.kind(), PieceKind::Queen);
    /// ```
    #[inline(always)]
    pub fn from_char(piece: char) -> Result<Self> {
        let kind = PieceKind::from_char(piece)?;
        let color = if piece.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self::new(color, kind))
    }

    /// Converts this [`Piece`] to a character: uppercase for White, lowercase for Black.
    #[inline(always)]
    pub const fn char(&self) -> char {
        let c = self.kind.char();
        if self.color.is_white() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// The move sets computed the last time this piece's moves were calculated.
    #[inline(always)]
    pub const fn moves(&self) -> &MoveSets {
        &self.moves
    }

    #[inline(always)]
    pub const fn available_moves(&self) -> CellSet {
        self.moves.available
    }

    #[inline(always)]
    pub const fn blocked_moves(&self) -> CellSet {
        self.moves.blocked
    }

    #[inline(always)]
    pub const fn potential_moves(&self) -> CellSet {
        self.moves.potential
    }

    /// Returns `true` if `cell` was among this piece's available moves when they were last calculated.
    #[inline(always)]
    pub const fn is_allowed_to_move(&self, cell: super::Cell) -> bool {
        self.moves.available.contains(cell)
    }

    pub(crate) fn set_has_moved(&mut self, has_moved: bool) {
        self.has_moved = has_moved;
    }

    pub(crate) fn set_moves(&mut self, moves: MoveSets) {
        self.moves = moves;
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
        self.moves = MoveSets::EMPTY;
    }

    pub(crate) fn revive(&mut self) {
        self.alive = true;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

impl FromStr for Piece {
    type Err = anyhow::Error;
    /// Parses a single piece character, such as `N` or `q`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => bail!("Piece must be a single character. Got {s:?}"),
        }
    }
}

/// One side of the game: a [`Color`] and the pieces it owns, in creation order.
///
/// Captured pieces stay in the list; they are only removed from the board.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Player {
    color: Color,
    pieces: Vec<PieceId>,
}

impl Player {
    #[inline(always)]
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            pieces: Vec::new(),
        }
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// All pieces this player has ever owned, dead or alive.
    #[inline(always)]
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    pub(crate) fn push(&mut self, id: PieceId) {
        self.pieces.push(id);
    }
}
