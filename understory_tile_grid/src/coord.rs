// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::RangeInclusive;

use kurbo::Rect;

/// A cell of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    /// Column index; grows with world `x`.
    pub col: i64,
    /// Row index; grows with world `y`.
    pub row: i64,
}

impl GridCoord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    /// World rectangle covered by this cell for square tiles of `tile_size`.
    #[must_use]
    pub fn world_rect(self, tile_size: f64) -> Rect {
        let x0 = self.col as f64 * tile_size;
        let y0 = self.row as f64 * tile_size;
        Rect::new(x0, y0, x0 + tile_size, y0 + tile_size)
    }
}

impl From<(i64, i64)> for GridCoord {
    fn from((col, row): (i64, i64)) -> Self {
        Self::new(col, row)
    }
}

/// Inclusive rectangle of grid cells.
///
/// Iteration is row-major: all columns of the first row, then the next row.
/// The position of a cell in that order is its *ordinal*.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridRange {
    col_min: i64,
    col_max: i64,
    row_min: i64,
    row_max: i64,
}

impl GridRange {
    /// A range containing no cells.
    pub const EMPTY: Self = Self {
        col_min: 0,
        col_max: -1,
        row_min: 0,
        row_max: -1,
    };

    /// Creates a range from inclusive column and row bounds.
    ///
    /// Inverted bounds produce [`GridRange::EMPTY`].
    #[must_use]
    pub fn new(cols: RangeInclusive<i64>, rows: RangeInclusive<i64>) -> Self {
        let (col_min, col_max) = cols.into_inner();
        let (row_min, row_max) = rows.into_inner();
        if col_min > col_max || row_min > row_max {
            return Self::EMPTY;
        }
        Self {
            col_min,
            col_max,
            row_min,
            row_max,
        }
    }

    /// Inclusive column bounds.
    #[must_use]
    pub fn cols(&self) -> RangeInclusive<i64> {
        self.col_min..=self.col_max
    }

    /// Inclusive row bounds.
    #[must_use]
    pub fn rows(&self) -> RangeInclusive<i64> {
        self.row_min..=self.row_max
    }

    /// Returns `true` if the range holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.col_min > self.col_max || self.row_min > self.row_max
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        span(self.col_min, self.col_max)
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        span(self.row_min, self.row_max)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.width().saturating_mul(self.height())
    }

    /// Returns `true` if `coord` lies inside the range.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.cols().contains(&coord.col) && self.rows().contains(&coord.row)
    }

    /// Row-major position of `coord`, or `None` if it lies outside.
    #[must_use]
    pub fn ordinal_of(&self, coord: GridCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let dy = span(self.row_min, coord.row) - 1;
        let dx = span(self.col_min, coord.col) - 1;
        Some(dy * self.width() + dx)
    }

    /// Iterates over the cells in row-major order.
    #[must_use]
    pub fn iter(&self) -> GridRangeIter {
        GridRangeIter {
            range: *self,
            next: (!self.is_empty()).then_some(GridCoord::new(self.col_min, self.row_min)),
        }
    }
}

impl IntoIterator for GridRange {
    type Item = GridCoord;
    type IntoIter = GridRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &GridRange {
    type Item = GridCoord;
    type IntoIter = GridRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over a [`GridRange`].
#[derive(Clone, Debug)]
pub struct GridRangeIter {
    range: GridRange,
    next: Option<GridCoord>,
}

impl Iterator for GridRangeIter {
    type Item = GridCoord;

    fn next(&mut self) -> Option<GridCoord> {
        let current = self.next?;
        self.next = if current.col < self.range.col_max {
            Some(GridCoord::new(current.col + 1, current.row))
        } else if current.row < self.range.row_max {
            Some(GridCoord::new(self.range.col_min, current.row + 1))
        } else {
            None
        };
        Some(current)
    }
}

fn span(min: i64, max: i64) -> usize {
    if min > max {
        return 0;
    }
    let count = (i128::from(max) - i128::from(min) + 1).unsigned_abs();
    usize::try_from(count).unwrap_or(usize::MAX)
}
