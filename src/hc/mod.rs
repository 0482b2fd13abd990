//! Random-restart steepest-ascent hill climbing.
//!
//! Each restart draws a fresh [`initial_state`](crate::space::ProblemSpace::initial_state)
//! and climbs to the best neighbor while that neighbor is strictly better.
//! The best local optimum over all restarts is returned.
//!
//! # Key Types
//!
//! - [`HcConfig`]: restart budget, step cap, seed
//! - [`HcRunner`]: executes the restart loop
//! - [`HcResult`]: best state with statistics
//! - [`Climb`]: trace of a single climb
//!
//! # References
//!
//! - Russell & Norvig (2010), *Artificial Intelligence: A Modern Approach*, §4.1.1

mod config;
mod runner;

pub use config::HcConfig;
pub use runner::{Climb, HcResult, HcRunner};
