//! Latin-square-style puzzle model.
//!
//! An N×N grid (N a perfect square) whose rows, columns and √N×√N boxes
//! must each hold distinct values. Blank cells are `0`.
//!
//! # Key Types
//!
//! - [`Grid`]: immutable board of clues
//! - [`Cell`]: one `(x, y, value)` assignment
//! - [`PuzzleProblem`]: conflict-counting [`ProblemSpace`](crate::space::ProblemSpace)
//! - [`PuzzleEvolutionaryProblem`]: genetic operators on top of it
//!
//! # Loading
//!
//! [`load`] reads the text format documented in [`loader`]; [`Grid`] also
//! implements `FromStr` for the same format.

mod cell;
mod evolutionary;
mod grid;
pub mod loader;
mod problem;

pub use cell::Cell;
pub use evolutionary::{single_point_crossover, PuzzleEvolutionaryProblem, MUTATION_RATE};
pub use grid::Grid;
pub use loader::{load, parse};
pub use problem::{NeighborDomain, PuzzleProblem};
