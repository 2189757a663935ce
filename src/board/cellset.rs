/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not},
};

use super::Cell;

/// A [`CellSet`] is a set of cells on the board, stored as one bit per cell.
///
/// Bit `n` corresponds to the [`Cell`] whose flat index is `n`, so the low order bits represent the top rows of the board.
/// Move sets ("available", "blocked" and "potential" moves) are all [`CellSet`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct CellSet(pub(crate) u64);

impl CellSet {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(u64::MAX);

    /// Constructs a new [`CellSet`] from the provided bit pattern.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Constructs a [`CellSet`] holding only `cell`.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Cell, CellSet};
    /// let set = CellSet::from_cell(Cell::new(7, 7).unwrap());
    /// assert_eq!(set.inner(), 0x8000000000000000);
    /// ```
    #[inline(always)]
    pub const fn from_cell(cell: Cell) -> Self {
        Self(1 << cell.index())
    }

    /// Returns the inner `u64` of this [`CellSet`].
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Returns `true` if no cells are in this set.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if at least one cell is in this set.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns `true` if `cell` is in this set.
    #[inline(always)]
    pub const fn contains(&self, cell: Cell) -> bool {
        self.0 & (1 << cell.index()) != 0
    }

    /// Returns `true` if the two sets share at least one cell.
    #[inline(always)]
    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` if every cell of `other` is also in `self`.
    #[inline(always)]
    pub const fn is_superset(&self, other: Self) -> bool {
        other.0 & !self.0 == 0
    }

    /// Adds `cell` to this set.
    #[inline(always)]
    pub fn insert(&mut self, cell: Cell) {
        self.0 |= 1 << cell.index();
    }

    /// Removes every cell of `other` from this set.
    #[inline(always)]
    pub fn remove(&mut self, other: impl Into<Self>) {
        self.0 &= !other.into().0;
    }

    /// Number of cells in this set.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns the cell with the lowest index in this set, if there is one.
    #[inline(always)]
    pub const fn first(&self) -> Option<Cell> {
        if self.is_empty() {
            None
        } else {
            Some(Cell::from_index_unchecked(self.0.trailing_zeros() as usize))
        }
    }

    /// Removes and returns the cell with the lowest index in this set.
    #[inline(always)]
    pub fn pop_first(&mut self) -> Option<Cell> {
        let cell = self.first()?;
        self.0 &= self.0 - 1;
        Some(cell)
    }

    /// Returns an iterator over all cells in this set, in flat index order.
    ///
    /// # Example
    /// ```
    /// # use fchess::{Cell, CellSet};
    /// let set: CellSet = ["5,0", "5,2"].iter().map(|s| s.parse::<Cell>().unwrap()).collect();
    /// let cells = set.iter().map(|c| c.to_string()).collect::<Vec<_>>();
    /// assert_eq!(cells, ["5,0", "5,2"]);
    /// ```
    #[inline(always)]
    pub const fn iter(&self) -> CellSetIter {
        CellSetIter { set: *self }
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

impl From<Cell> for CellSet {
    #[inline(always)]
    fn from(value: Cell) -> Self {
        Self::from_cell(value)
    }
}

macro_rules! impl_bitwise_op {
    // Impl op and op_assign for Self
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident) => {
        impl<T: Into<CellSet>> $op<T> for CellSet {
            type Output = Self;
            #[inline(always)]
            fn $func(self, rhs: T) -> Self::Output {
                Self(self.0.$func(rhs.into().0))
            }
        }

        impl<T: Into<CellSet>> $op_assign<T> for CellSet {
            #[inline(always)]
            fn $func_assign(&mut self, rhs: T) {
                self.0.$func_assign(rhs.into().0);
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign);

impl Not for CellSet {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl fmt::Display for CellSet {
    /// Draws the set as an `8x8` grid, row 0 first, marking member cells with `X`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grid = String::with_capacity(136);

        for cell in Cell::iter() {
            grid.push(if self.contains(cell) { 'X' } else { '.' });
            grid.push(if cell.column() == 7 { '\n' } else { ' ' });
        }

        write!(f, "{grid}")
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// An iterator over all cells in a [`CellSet`].
///
/// See [`CellSet::iter`].
pub struct CellSetIter {
    set: CellSet,
}

impl Iterator for CellSetIter {
    type Item = Cell;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.set.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.set.len();
        (size, Some(size))
    }
}

impl ExactSizeIterator for CellSetIter {}

impl IntoIterator for CellSet {
    type Item = Cell;
    type IntoIter = CellSetIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &CellSet {
    type Item = Cell;
    type IntoIter = CellSetIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u8, column: u8) -> Cell {
        Cell::new(row, column).unwrap()
    }

    #[test]
    fn test_set_membership() {
        let mut set = CellSet::EMPTY;
        assert!(set.is_empty());

        set.insert(cell(0, 4));
        set.insert(cell(1, 4));
        assert_eq!(set.len(), 2);
        assert!(set.contains(cell(0, 4)));
        assert!(!set.contains(cell(0, 3)));

        set.remove(cell(0, 4));
        assert_eq!(set.len(), 1);
        assert_eq!(set.first(), Some(cell(1, 4)));
    }

    #[test]
    fn test_set_masking() {
        let a: CellSet = [cell(0, 1), cell(0, 2), cell(0, 3)].into_iter().collect();
        let b: CellSet = [cell(0, 3), cell(0, 5)].into_iter().collect();

        assert_eq!((a & b).iter().collect::<Vec<_>>(), [cell(0, 3)]);
        assert_eq!((a | b).len(), 4);
        assert!(a.intersects(b));
        assert!(a.is_superset(cell(0, 2).into()));
        assert!(!(a & !b).contains(cell(0, 3)));
    }

    #[test]
    fn test_set_to_string() {
        let set = CellSet::from_cell(cell(0, 0)) | cell(7, 7);
        let expected = "X . . . . . . .\n\
                        . . . . . . . .\n\
                        . . . . . . . .\n\
                        . . . . . . . .\n\
                        . . . . . . . .\n\
                        . . . . . . . .\n\
                        . . . . . . . .\n\
                        . . . . . . . X\n";
        assert_eq!(set.to_string(), expected);
    }
}
