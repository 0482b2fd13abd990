//! Generational Genetic Algorithm.
//!
//! A generic GA driver over any
//! [`EvolutionaryProblemSpace`](crate::space::EvolutionaryProblemSpace).
//! The problem supplies every operator (selection, crossover, mutation,
//! fitness); the runner only sequences generations and enforces budgets.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, generation cap, time limit, seed
//! - [`GaRunner`]: executes the generational loop
//! - [`GaResult`]: final state with convergence flags and statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, GenerationStats};
