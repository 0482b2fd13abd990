//! Local-search experimentation harness.
//!
//! Two generic stochastic optimizers applied to a Latin-square-style
//! puzzle (row, column and box uniqueness):
//!
//! - **Hill Climbing (HC)**: random-restart steepest-ascent search over
//!   any [`ProblemSpace`](space::ProblemSpace).
//! - **Genetic Algorithm (GA)**: generational, fitness-proportional search
//!   over any [`EvolutionaryProblemSpace`](space::EvolutionaryProblemSpace).
//!
//! Both are heuristics: a run may end at a local optimum, or hit its
//! budget without converging.
//!
//! # Architecture
//!
//! The engines in [`hc`] and [`ga`] know nothing about puzzles. The
//! [`puzzle`] module implements the contracts in [`space`] for a concrete
//! board, and every stochastic operation takes an explicit random source,
//! so a seed fully determines a run.
//!
//! # Example
//!
//! ```
//! use u_localsearch::hc::{HcConfig, HcRunner};
//! use u_localsearch::puzzle::{Grid, PuzzleProblem};
//!
//! let grid: Grid = "4\n0234\n3412\n2103\n4320\n".parse().unwrap();
//! let problem = PuzzleProblem::new(grid);
//! let result = HcRunner::run(&problem, &HcConfig::default().with_seed(1));
//! assert_eq!(result.best_score, 0);
//! ```

pub mod error;
pub mod ga;
pub mod hc;
pub mod puzzle;
pub mod space;

pub use error::{Result, SearchError};
