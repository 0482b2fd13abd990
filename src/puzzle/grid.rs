//! Immutable N×N puzzle board.

use std::fmt;
use std::str::FromStr;

use super::cell::Cell;
use super::loader;
use crate::error::{Result, SearchError};

/// Square matrix of cell values, `0` meaning blank.
///
/// Coordinates are `(x, y)` with `y = 0` the bottom row. The dimension `N`
/// has an integer square root, the box size. A grid never changes after
/// construction; [`merge_with_overrides`](Self::merge_with_overrides)
/// returns a new grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dimension: usize,
    box_size: usize,
    /// Column-major: `values[x * dimension + y]`.
    values: Vec<u32>,
}

impl Grid {
    /// Builds a grid from columns, `columns[x][y]`.
    ///
    /// # Errors
    /// [`SearchError::Config`] if the matrix is not square, its dimension
    /// is zero or has no integer square root, or a value exceeds `N`.
    pub fn from_columns(columns: Vec<Vec<u32>>) -> Result<Self> {
        let dimension = columns.len();
        let box_size = integer_sqrt(dimension).ok_or_else(|| {
            SearchError::Config(format!(
                "dimension {dimension} has no integer square root"
            ))
        })?;

        let mut values = Vec::with_capacity(dimension * dimension);
        for (x, column) in columns.into_iter().enumerate() {
            if column.len() != dimension {
                return Err(SearchError::Config(format!(
                    "column {x} has {} cells, expected {dimension}",
                    column.len()
                )));
            }
            if let Some((y, &v)) = column
                .iter()
                .enumerate()
                .find(|&(_, &v)| v as usize > dimension)
            {
                return Err(SearchError::Config(format!(
                    "value {v} at ({x}, {y}) exceeds dimension {dimension}"
                )));
            }
            values.extend(column);
        }

        Ok(Self {
            dimension,
            box_size,
            values,
        })
    }

    /// Builds a grid from rows as they are displayed: `rows[0]` is the top
    /// row (`y = N - 1`), `rows[k][x]` is the value at `(x, N - 1 - k)`.
    ///
    /// # Errors
    /// Same as [`from_columns`](Self::from_columns).
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self> {
        let n = rows.len();
        let mut columns = vec![vec![0; n]; n];
        for (k, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(SearchError::Config(format!(
                    "row {k} has {} cells, expected {n}",
                    row.len()
                )));
            }
            for (x, &v) in row.iter().enumerate() {
                columns[x][n - 1 - k] = v;
            }
        }
        Self::from_columns(columns)
    }

    /// Side length `N`.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Box side length `√N`.
    pub fn box_size(&self) -> usize {
        self.box_size
    }

    /// Value at `(x, y)`.
    ///
    /// # Panics
    /// Panics if either coordinate is out of range.
    pub fn value(&self, x: usize, y: usize) -> u32 {
        assert!(
            x < self.dimension && y < self.dimension,
            "({x}, {y}) outside {0}x{0} grid",
            self.dimension
        );
        self.values[x * self.dimension + y]
    }

    /// Number of blank cells.
    pub fn blank_count(&self) -> usize {
        self.values.iter().filter(|&&v| v == 0).count()
    }

    /// Returns a copy of this grid with every listed cell written over.
    ///
    /// # Panics
    /// Panics if a cell lies outside the grid.
    pub fn merge_with_overrides(&self, overrides: &[Cell]) -> Grid {
        let mut values = self.values.clone();
        for cell in overrides {
            assert!(
                cell.x() < self.dimension && cell.y() < self.dimension,
                "override {cell} outside {0}x{0} grid",
                self.dimension
            );
            values[cell.x() * self.dimension + cell.y()] = cell.value();
        }
        Grid {
            dimension: self.dimension,
            box_size: self.box_size,
            values,
        }
    }

    /// One zero-valued [`Cell`] per blank position.
    ///
    /// Rows are visited from the top (`y = N - 1`) down, left to right
    /// within a row. This order is the canonical state-vector order.
    pub fn to_vector(&self) -> Vec<Cell> {
        let n = self.dimension;
        (0..n)
            .rev()
            .flat_map(|y| (0..n).map(move |x| (x, y)))
            .filter(|&(x, y)| self.values[x * n + y] == 0)
            .map(|(x, y)| Cell::new(x, y, 0))
            .collect()
    }
}

impl fmt::Display for Grid {
    /// One line per row, highest `y` first, values concatenated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.dimension).rev() {
            for x in 0..self.dimension {
                write!(f, "{}", self.value(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        loader::parse(s)
    }
}

fn integer_sqrt(n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    (1..=n)
        .take_while(|b| b * b <= n)
        .last()
        .filter(|b| b * b == n)
}
