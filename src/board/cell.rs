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

use anyhow::{anyhow, bail, Context, Result};

/// Represents a single cell on the `8x8` game board.
///
/// Cells are addressed by `(row, column)`, with row `0` at the top of the board and column `0` on the left.
/// Internally the cell stores its flat index, so `index = row * 8 + column`:
/// ```text
///    0  1  2  3  4  5  6  7
/// 0|  0  1  2  3  4  5  6  7
/// 1|  8  9 10 11 12 13 14 15
/// 2| 16 17 18 19 20 21 22 23
/// 3| 24 25 26 27 28 29 30 31
/// 4| 32 33 34 35 36 37 38 39
/// 5| 40 41 42 43 44 45 46 47
/// 6| 48 49 50 51 52 53 54 55
/// 7| 56 57 58 59 60 61 62 63
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Cell(pub(crate) u8);

impl Cell {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Number of rows (and columns) on the board.
    pub const SIDE: u8 = 8;

    /// Returns an iterator over all cells, in flat index order.
    ///
    /// # Example
    /// ```
    /// # use fchess::Cell;
    /// let mut iter = Cell::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Cell::new(0, 0).unwrap());
    /// assert_eq!(iter.last().unwrap(), Cell::new(7, 7).unwrap());
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Cell`] from the provided row and column.
    ///
    /// Both must be `[0, 7]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use fchess::Cell;
    /// let cell = Cell::new(6, 4).unwrap();
    /// assert_eq!(cell.index(), 52);
    /// assert!(Cell::new(8, 0).is_err());
    /// ```
    #[inline(always)]
    pub fn new(row: u8, column: u8) -> Result<Self> {
        if row >= Self::SIDE || column >= Self::SIDE {
            bail!("Invalid Cell: row and column must be between [0, 7]. Got ({row}, {column})");
        }
        Ok(Self::new_unchecked(row, column))
    }

    /// Creates a new [`Cell`] from the provided row and column, without error checking.
    ///
    /// # Panics
    ///
    /// If either coordinate is greater than `7` and debug assertions are enabled.
    #[inline(always)]
    pub const fn new_unchecked(row: u8, column: u8) -> Self {
        debug_assert!(row < 8 && column < 8, "Row and column must be between [0,8)");
        Self(row * Self::SIDE + column)
    }

    /// Creates a new [`Cell`] from the provided flat index.
    ///
    /// The provided `index` must be `[0, 63]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use fchess::Cell;
    /// let cell = Cell::from_index(57).unwrap();
    /// assert_eq!((cell.row(), cell.column()), (7, 1));
    /// assert!(Cell::from_index(64).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index > Self::MAX as usize {
            bail!(
                "Invalid index for Cell: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(index as u8))
    }

    /// Creates a new [`Cell`] from the provided flat index, without error checking.
    ///
    /// # Panics
    ///
    /// If `index` is greater than `63` and debug assertions are enabled.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < 64, "Index must be between [0,64)");
        Self(index as u8)
    }

    /// Returns the flat index of this [`Cell`], which is `row * 8 + column`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the row of this [`Cell`], `[0, 7]`.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 / Self::SIDE
    }

    /// Returns the column of this [`Cell`], `[0, 7]`.
    #[inline(always)]
    pub const fn column(&self) -> u8 {
        self.0 % Self::SIDE
    }

    /// Returns the cell `rows` rows and `columns` columns away from this one, if it is still on the board.
    ///
    /// The offset is applied to each coordinate separately, so it never wraps around to another row.
    ///
    /// # Example
    /// ```
    /// # use fchess::Cell;
    /// let cell = Cell::new(3, 0).unwrap();
    /// assert_eq!(cell.offset(1, 1), Some(Cell::new(4, 1).unwrap()));
    /// assert_eq!(cell.offset(0, -1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, rows: i8, columns: i8) -> Option<Self> {
        let row = self.row() as i8 + rows;
        let column = self.column() as i8 + columns;

        if row < 0 || row >= Self::SIDE as i8 || column < 0 || column >= Self::SIDE as i8 {
            None
        } else {
            Some(Self::new_unchecked(row as u8, column as u8))
        }
    }

    /// Row distance between two cells.
    #[inline(always)]
    pub const fn distance_rows(&self, other: Self) -> u8 {
        self.row().abs_diff(other.row())
    }

    /// Column distance between two cells.
    #[inline(always)]
    pub const fn distance_columns(&self, other: Self) -> u8 {
        self.column().abs_diff(other.column())
    }
}

impl FromStr for Cell {
    type Err = anyhow::Error;

    /// Parses a [`Cell`] written as `row,column`, optionally wrapped in parentheses.
    ///
    /// # Example
    /// ```
    /// # use fchess::Cell;
    /// let cell: Cell = "6,4".parse().unwrap();
    /// assert_eq!(cell, Cell::new(6, 4).unwrap());
    /// assert_eq!("(6, 4)".parse::<Cell>().unwrap(), cell);
    /// assert!("6".parse::<Cell>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim();

        let (row, column) = inner
            .split_once(',')
            .ok_or(anyhow!("Invalid Cell string: expected `row,column`. Got {s:?}"))?;

        let row = row
            .trim()
            .parse()
            .with_context(|| format!("Invalid row in Cell string {s:?}"))?;
        let column = column
            .trim()
            .parse()
            .with_context(|| format!("Invalid column in Cell string {s:?}"))?;

        Self::new(row, column)
    }
}

impl TryFrom<usize> for Cell {
    type Error = anyhow::Error;
    #[inline(always)]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_index(value)
    }
}

impl TryFrom<(u8, u8)> for Cell {
    type Error = anyhow::Error;
    #[inline(always)]
    fn try_from((row, column): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(row, column)
    }
}

impl<T> Index<Cell> for [T; Cell::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Cell) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Cell> for [T; Cell::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Cell) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row(), self.column())
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row(), self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells() {
        // The four corners
        assert_eq!(Cell::new(0, 0).unwrap().index(), 0);
        assert_eq!(Cell::new(0, 7).unwrap().index(), 7);
        assert_eq!(Cell::new(7, 0).unwrap().index(), 56);
        assert_eq!(Cell::new(7, 7).unwrap().index(), 63);

        // And something near the middle
        let cell = Cell::new(3, 5).unwrap();
        assert_eq!(cell.index(), 29);
        assert_eq!(cell.row(), 3);
        assert_eq!(cell.column(), 5);
        assert_eq!(cell.to_string(), "3,5");
    }

    #[test]
    fn test_parsing() {
        assert_eq!("0,0".parse::<Cell>().unwrap(), Cell::new(0, 0).unwrap());
        assert_eq!("(7,7)".parse::<Cell>().unwrap(), Cell::new(7, 7).unwrap());
        assert_eq!(" 5 , 2 ".parse::<Cell>().unwrap(), Cell::new(5, 2).unwrap());

        assert!("8,0".parse::<Cell>().is_err());
        assert!("0,8".parse::<Cell>().is_err());
        assert!("-1,0".parse::<Cell>().is_err());
        assert!("a,b".parse::<Cell>().is_err());
        assert!("".parse::<Cell>().is_err());

        assert_eq!(Cell::try_from(63usize).unwrap(), Cell::new(7, 7).unwrap());
        assert!(Cell::try_from(64usize).is_err());
        assert_eq!(Cell::try_from((2u8, 3u8)).unwrap().index(), 19);
    }

    #[test]
    fn test_offset_never_wraps() {
        // Column 0 minus one must not land on the previous row's last column
        let left_edge = Cell::new(4, 0).unwrap();
        assert_eq!(left_edge.offset(0, -1), None);
        assert_eq!(left_edge.offset(-1, -1), None);

        let right_edge = Cell::new(4, 7).unwrap();
        assert_eq!(right_edge.offset(0, 1), None);
        assert_eq!(right_edge.offset(1, 1), None);

        let corner = Cell::new(7, 7).unwrap();
        assert_eq!(corner.offset(1, 0), None);
        assert_eq!(corner.offset(-2, -1), Some(Cell::new(5, 6).unwrap()));
    }

    #[test]
    fn test_indexing() {
        let mut board = [0; 64];
        board[Cell::new(4, 3).unwrap()] = u8::MAX;
        assert_eq!(board[35], u8::MAX);
    }
}
