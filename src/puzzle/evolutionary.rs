//! Genetic operators for the puzzle.
//!
//! [`PuzzleEvolutionaryProblem`] wraps a [`PuzzleProblem`] and adds
//! fitness, roulette-wheel selection, single-point crossover and
//! single-cell mutation on top of its evaluator.

use std::cmp::Reverse;

use rand::Rng;

use super::cell::Cell;
use super::grid::Grid;
use super::problem::PuzzleProblem;
use crate::error::{Result, SearchError};
use crate::space::{EvolutionaryProblemSpace, ProblemSpace, Score};

/// Probability that a child is mutated.
pub const MUTATION_RATE: f64 = 0.3;

/// The puzzle as an [`EvolutionaryProblemSpace`].
///
/// Fitness is `max_conflicts - evaluate(state)` where
/// `max_conflicts = 3(N - 1) · 2N`. The bound is loose rather than tight:
/// a badly conflicted board can score below it, giving negative fitness.
/// Selection treats that as a degenerate wheel and falls back to the last
/// member.
#[derive(Debug, Clone)]
pub struct PuzzleEvolutionaryProblem {
    base: PuzzleProblem,
    max_conflicts: Score,
}

impl PuzzleEvolutionaryProblem {
    /// Creates the evolutionary view of a puzzle.
    pub fn new(base: PuzzleProblem) -> Self {
        let n = base.grid().dimension() as Score;
        let per_cell = (n - 1) * 3;
        let cells = n * 2;
        Self {
            base,
            max_conflicts: per_cell * cells,
        }
    }

    /// Shorthand for `new(PuzzleProblem::new(grid))`.
    pub fn from_grid(grid: Grid) -> Self {
        Self::new(PuzzleProblem::new(grid))
    }

    /// The wrapped evaluator.
    pub fn base(&self) -> &PuzzleProblem {
        &self.base
    }

    /// Upper bound used to turn conflicts into fitness.
    pub fn max_conflicts(&self) -> Score {
        self.max_conflicts
    }

    /// Roulette-wheel lookup of `draw` (in `[0, 1)`) over the population.
    ///
    /// Each member owns the closed interval `[start, start + share]` where
    /// `share = fitness / total`; the first interval containing `draw` wins.
    ///
    /// # Errors
    /// [`SearchError::Selection`] if total fitness is not positive or the
    /// accumulated shares never reach `draw`.
    pub fn proportional_index(&self, population: &[Vec<Cell>], draw: f64) -> Result<usize> {
        let fitness: Vec<Score> = population.iter().map(|s| self.fitness(s)).collect();
        roulette_index(&fitness, draw)
    }
}

fn roulette_index(fitness: &[Score], draw: f64) -> Result<usize> {
    let total: Score = fitness.iter().sum();
    if total <= 0 {
        return Err(SearchError::Selection(format!(
            "total fitness {total} over {} members is not positive",
            fitness.len()
        )));
    }

    let mut start = 0.0;
    for (i, &f) in fitness.iter().enumerate() {
        let share = f as f64 / total as f64;
        if start <= draw && draw <= start + share {
            return Ok(i);
        }
        start += share;
    }

    Err(SearchError::Selection(format!(
        "draw {draw} beyond cumulative share {start}"
    )))
}

/// Single-point crossover: `child[i] = x[i]` for `i <= cutoff`, else `y[i]`.
///
/// # Panics
/// Panics if the parents differ in length.
pub fn single_point_crossover(x: &[Cell], y: &[Cell], cutoff: usize) -> Vec<Cell> {
    assert_eq!(x.len(), y.len(), "parents must have equal length");
    x.iter()
        .zip(y)
        .enumerate()
        .map(|(i, (&a, &b))| if i <= cutoff { a } else { b })
        .collect()
}

impl ProblemSpace for PuzzleEvolutionaryProblem {
    type State = Vec<Cell>;

    fn evaluate(&self, state: &Vec<Cell>) -> Score {
        self.base.evaluate(state)
    }

    fn successors(&self, state: &Vec<Cell>) -> Vec<Vec<Cell>> {
        self.base.successors(state)
    }

    fn initial_state<R: Rng>(&self, rng: &mut R) -> Vec<Cell> {
        self.base.initial_state(rng)
    }

    fn is_good_enough(&self, score: Score) -> bool {
        self.base.is_good_enough(score)
    }

    fn is_better(&self, a: Score, b: Score) -> bool {
        self.base.is_better(a, b)
    }

    fn is_search_done(&self, current: Score, neighbor: Score) -> bool {
        self.base.is_search_done(current, neighbor)
    }
}

impl EvolutionaryProblemSpace for PuzzleEvolutionaryProblem {
    fn initial_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Vec<Cell>> {
        let mut population = self.empty_population();
        population.extend(
            (0..size)
                .map(|_| self.initial_state(rng))
                .filter(|state| !state.is_empty()),
        );
        population
    }

    fn fitness(&self, state: &Vec<Cell>) -> Score {
        self.max_conflicts - self.evaluate(state)
    }

    fn is_fit_enough(&self, state: &Vec<Cell>) -> bool {
        self.evaluate(state) == 0
    }

    fn most_fit<'p>(&self, population: &'p [Vec<Cell>]) -> Option<&'p Vec<Cell>> {
        // min_by_key keeps the first of equal keys
        population.iter().min_by_key(|s| Reverse(self.fitness(s)))
    }

    fn mutation_rate(&self) -> f64 {
        MUTATION_RATE
    }

    /// Resamples one random cell until its value changes.
    ///
    /// On an empty state or a 1×1 grid no different value exists and the
    /// copy is returned unchanged.
    fn mutate<R: Rng>(&self, state: &Vec<Cell>, rng: &mut R) -> Vec<Cell> {
        let mut copy = state.clone();
        if copy.is_empty() || self.base.grid().dimension() < 2 {
            return copy;
        }

        let index = rng.random_range(0..copy.len());
        let current = copy[index].value();
        let mut value = self.base.random_value(rng);
        while value == current {
            value = self.base.random_value(rng);
        }
        copy[index] = copy[index].with_value(value);
        copy
    }

    fn reproduce<R: Rng>(&self, x: &Vec<Cell>, y: &Vec<Cell>, rng: &mut R) -> Vec<Cell> {
        if x.is_empty() {
            return x.clone();
        }
        let cutoff = rng.random_range(0..x.len());
        single_point_crossover(x, y, cutoff)
    }

    fn select<'p, R: Rng>(&self, population: &'p [Vec<Cell>], rng: &mut R) -> &'p Vec<Cell> {
        let fitness: Vec<Score> = population.iter().map(|s| self.fitness(s)).collect();
        self.select_with_fitness(population, &fitness, rng)
    }

    fn select_with_fitness<'p, R: Rng>(
        &self,
        population: &'p [Vec<Cell>],
        fitness: &[Score],
        rng: &mut R,
    ) -> &'p Vec<Cell> {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        debug_assert_eq!(fitness.len(), population.len());
        let draw: f64 = rng.random();
        let index = roulette_index(fitness, draw).unwrap_or_else(|err| {
            log::debug!("{err}; falling back to last member");
            population.len() - 1
        });
        &population[index]
    }
}
