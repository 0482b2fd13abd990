//! One assignable grid position.

use std::fmt;

/// An immutable `(x, y, value)` assignment.
///
/// Equality and hashing cover all three fields: two cells at the same
/// coordinates with different values are different cells. State vectors
/// are compared element-wise, so this is what makes two states equal only
/// when every assignment matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    x: usize,
    y: usize,
    value: u32,
}

impl Cell {
    /// Creates a cell at `(x, y)` holding `value`.
    pub fn new(x: usize, y: usize, value: u32) -> Self {
        Self { x, y, value }
    }

    /// Column coordinate.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row coordinate; `y = 0` is the bottom row.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Assigned value; `0` means blank.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Same position, new value.
    pub fn with_value(&self, value: u32) -> Self {
        Self { value, ..*self }
    }
}

impl fmt::Display for Cell {
    /// Renders 1-based coordinates, e.g. `(1, 4): 3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}): {}", self.x + 1, self.y + 1, self.value)
    }
}
