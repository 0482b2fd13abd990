//! Core trait definitions for the search engines.
//!
//! [`ProblemSpace`] is the contract between the hill-climbing engine and a
//! domain; [`EvolutionaryProblemSpace`] extends it with what the genetic
//! algorithm needs.

use rand::Rng;
use std::fmt::Debug;

/// Integer score type used for both costs and fitness values.
pub type Score = i64;

/// Defines a searchable problem.
///
/// States are values: every operation takes them by reference and returns
/// fresh states, so a state handed to an engine is never modified in place.
///
/// # Minimization
///
/// [`evaluate`](Self::evaluate) returns a cost. [`is_better`](Self::is_better)
/// is the strict ordering the engines use, and
/// [`rank_best_first`](Self::rank_best_first) must agree with it.
///
/// # Examples
///
/// ```ignore
/// struct Distance { target: i64 }
///
/// impl ProblemSpace for Distance {
///     type State = i64;
///
///     fn evaluate(&self, x: &i64) -> Score { (x - self.target).abs() }
///     fn successors(&self, x: &i64) -> Vec<i64> { vec![x - 1, x + 1] }
///     fn initial_state<R: Rng>(&self, rng: &mut R) -> i64 { rng.random_range(-100..100) }
///     fn is_good_enough(&self, score: Score) -> bool { score == 0 }
///     fn is_better(&self, a: Score, b: Score) -> bool { a < b }
///     fn is_search_done(&self, current: Score, neighbor: Score) -> bool { neighbor >= current }
/// }
/// ```
pub trait ProblemSpace {
    /// The state representation.
    type State: Clone + Debug;

    /// Computes the cost of a state. Lower is better.
    fn evaluate(&self, state: &Self::State) -> Score;

    /// Returns every single-step neighbor of `state`. May be empty.
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Creates a fresh randomized starting state.
    fn initial_state<R: Rng>(&self, rng: &mut R) -> Self::State;

    /// Whether `score` qualifies as a terminal solution.
    fn is_good_enough(&self, score: Score) -> bool;

    /// Strict ordering: whether `a` is better than `b`.
    fn is_better(&self, a: Score, b: Score) -> bool;

    /// Whether a search should stop given the current score and the score
    /// of its best neighbor.
    ///
    /// Part of the contract for callers that drive their own loop. The
    /// engines in this crate decide with [`is_better`](Self::is_better)
    /// and never call it.
    fn is_search_done(&self, current: Score, neighbor: Score) -> bool;

    /// Stable sort of `candidates` by [`evaluate`](Self::evaluate),
    /// ascending, so the best state comes first.
    fn rank_best_first(&self, mut candidates: Vec<Self::State>) -> Vec<Self::State> {
        candidates.sort_by_cached_key(|s| self.evaluate(s));
        candidates
    }
}

/// Extends [`ProblemSpace`] with population and genetic operators.
///
/// Fitness is higher-is-better, typically `upper_bound - evaluate(state)`.
///
/// Every stochastic operator receives the caller's random source, which
/// makes a whole run reproducible from one seed.
pub trait EvolutionaryProblemSpace: ProblemSpace {
    /// Returns a fresh, empty population container.
    fn empty_population(&self) -> Vec<Self::State> {
        Vec::new()
    }

    /// Creates up to `size` random states.
    ///
    /// Degenerate (for example empty) states are dropped, so the returned
    /// population may be smaller than requested.
    fn initial_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Self::State>;

    /// Fitness of a state. Higher is better.
    fn fitness(&self, state: &Self::State) -> Score;

    /// Whether `state` is fit enough to stop evolving.
    fn is_fit_enough(&self, state: &Self::State) -> bool;

    /// The member with maximum fitness; the earliest one wins ties.
    ///
    /// Returns `None` only for an empty population.
    fn most_fit<'p>(&self, population: &'p [Self::State]) -> Option<&'p Self::State>;

    /// Probability in `[0, 1]` that a child is mutated.
    fn mutation_rate(&self) -> f64;

    /// Returns a copy of `state` differing in exactly one position.
    fn mutate<R: Rng>(&self, state: &Self::State, rng: &mut R) -> Self::State;

    /// Crossover of two parents into one child.
    fn reproduce<R: Rng>(
        &self,
        parent_a: &Self::State,
        parent_b: &Self::State,
        rng: &mut R,
    ) -> Self::State;

    /// Fitness-proportional random pick.
    ///
    /// # Panics
    /// May panic if `population` is empty.
    fn select<'p, R: Rng>(&self, population: &'p [Self::State], rng: &mut R) -> &'p Self::State;

    /// [`select`](Self::select) given the population's fitness, computed
    /// once per generation; `fitness[i]` belongs to `population[i]`.
    ///
    /// The default ignores `fitness` and calls `select`.
    fn select_with_fitness<'p, R: Rng>(
        &self,
        population: &'p [Self::State],
        _fitness: &[Score],
        rng: &mut R,
    ) -> &'p Self::State {
        self.select(population, rng)
    }
}
