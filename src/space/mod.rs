//! Search-space contracts.
//!
//! The engines in [`crate::hc`] and [`crate::ga`] never see puzzle details.
//! Everything they know about a problem is reached through the two traits
//! defined here:
//!
//! - [`ProblemSpace`]: evaluation, neighborhood and ordering of states
//! - [`EvolutionaryProblemSpace`]: population, fitness and genetic operators
//!
//! Scores from [`ProblemSpace::evaluate`] are costs (lower is better);
//! values from [`EvolutionaryProblemSpace::fitness`] run the other way
//! (higher is better). Implementations keep the two consistent.

mod types;

pub use types::{EvolutionaryProblemSpace, ProblemSpace, Score};
