//! GA generational loop execution.
//!
//! [`GaRunner`] orchestrates the evolutionary process:
//! initialization → selection → crossover → mutation → replace → repeat.
//!
//! Each generation builds a brand-new population of the same size. Every
//! child comes from two independent fitness-proportional picks (possibly
//! the same parent), one crossover, and a mutation with probability
//! [`mutation_rate`](EvolutionaryProblemSpace::mutation_rate). The run ends
//! when the generation's fittest member is fit enough, or when a budget
//! (generations, time, cancellation) runs out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::GaConfig;
use crate::error::Result;
use crate::space::{EvolutionaryProblemSpace, Score};

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<S: Clone> {
    /// Fittest state seen in any generation, or the converged champion.
    pub best: S,

    /// Fitness of `best`.
    pub best_fitness: Score,

    /// Generations completed.
    pub generations: usize,

    /// Whether `best` is fit enough. `false` means the budget ran out first.
    pub converged: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run hit `time_limit_ms`.
    pub timed_out: bool,

    /// One entry per completed generation.
    pub history: Vec<GenerationStats>,
}

/// Summary of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,

    /// Number of members.
    pub population_size: usize,

    /// Fitness of the generation's fittest member.
    pub best_fitness: Score,

    /// Mean fitness over the generation.
    pub mean_fitness: f64,
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```ignore
/// let problem = PuzzleEvolutionaryProblem::from_grid(grid);
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Fitness value: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    ///
    /// # Errors
    /// [`SearchError::Config`](crate::error::SearchError::Config) if the
    /// configuration is invalid.
    pub fn run<P: EvolutionaryProblemSpace>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::State>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before the next generation and returns the best state found so far.
    pub fn run_with_cancel<P: EvolutionaryProblemSpace>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::State>> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        Ok(evolve(problem, config, cancel.as_deref(), &mut rng))
    }
}

fn evolve<P: EvolutionaryProblemSpace, R: Rng>(
    problem: &P,
    config: &GaConfig,
    cancel: Option<&AtomicBool>,
    rng: &mut R,
) -> GaResult<P::State> {
    let started = Instant::now();
    let time_limit = config.time_limit_ms.map(Duration::from_millis);

    // 1. Initialize population
    let mut population = problem.initial_population(config.population_size, rng);
    let Some(initial_best) = problem.most_fit(&population).cloned() else {
        // Nothing to evolve: the state space has a single, empty state.
        let best = problem.initial_state(rng);
        log::info!("initial population is empty; returning the only state");
        return GaResult {
            best_fitness: problem.fitness(&best),
            converged: problem.is_fit_enough(&best),
            best,
            generations: 0,
            cancelled: false,
            timed_out: false,
            history: Vec::new(),
        };
    };
    log::info!(
        "GA started with {} members (requested {})",
        population.len(),
        config.population_size
    );

    let mutation_rate = problem.mutation_rate();
    let mut fitness: Vec<Score> = population.iter().map(|s| problem.fitness(s)).collect();
    let mut best_fitness = problem.fitness(&initial_best);
    let mut best = initial_best;
    let mut history = Vec::with_capacity(config.max_generations.min(4096));
    let mut cancelled = false;
    let mut timed_out = false;

    // 2. Generational loop
    for generation in 1..=config.max_generations {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            cancelled = true;
            log::info!("GA cancelled before generation {generation}");
            break;
        }
        if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
            timed_out = true;
            log::info!("GA time limit reached before generation {generation}");
            break;
        }

        let mut next = problem.empty_population();
        for _ in 0..population.len() {
            let parent_a = problem.select_with_fitness(&population, &fitness, rng);
            let parent_b = problem.select_with_fitness(&population, &fitness, rng);
            let mut child = problem.reproduce(parent_a, parent_b, rng);
            if rng.random_range(0.0..1.0) < mutation_rate {
                child = problem.mutate(&child, rng);
            }
            next.push(child);
        }
        population = next;

        // 3. Champion of the new generation
        fitness = population.iter().map(|s| problem.fitness(s)).collect();
        let Some(champion) = problem.most_fit(&population) else {
            break;
        };
        let champion_fitness = problem.fitness(champion);
        let mean_fitness = fitness.iter().sum::<Score>() as f64 / fitness.len() as f64;
        history.push(GenerationStats {
            generation,
            population_size: population.len(),
            best_fitness: champion_fitness,
            mean_fitness,
        });
        log::info!("generation {generation}: best fitness {champion_fitness}, mean {mean_fitness:.2}");
        log::debug!("chosen {champion:?}");

        // 4. Stop on a fit champion
        if problem.is_fit_enough(champion) {
            log::info!("GA converged after {generation} generations");
            return GaResult {
                best: champion.clone(),
                best_fitness: champion_fitness,
                generations: generation,
                converged: true,
                cancelled: false,
                timed_out: false,
                history,
            };
        }

        if champion_fitness > best_fitness {
            best = champion.clone();
            best_fitness = champion_fitness;
        }
    }

    if !cancelled && !timed_out {
        log::warn!(
            "GA did not converge within {} generations; best fitness {best_fitness}",
            config.max_generations
        );
    }

    GaResult {
        converged: problem.is_fit_enough(&best),
        best,
        best_fitness,
        generations: history.len(),
        cancelled,
        timed_out,
        history,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::puzzle::{Grid, PuzzleEvolutionaryProblem};
    use crate::space::ProblemSpace;

    // ---- OneMax: maximize the number of set bits ----

    struct OneMax {
        n: usize,
    }

    impl ProblemSpace for OneMax {
        type State = Vec<bool>;

        fn evaluate(&self, bits: &Vec<bool>) -> Score {
            bits.iter().filter(|&&b| !b).count() as Score
        }

        fn successors(&self, bits: &Vec<bool>) -> Vec<Vec<bool>> {
            (0..bits.len())
                .map(|i| {
                    let mut next = bits.clone();
                    next[i] = !next[i];
                    next
                })
                .collect()
        }

        fn initial_state<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
            (0..self.n).map(|_| rng.random_bool(0.5)).collect()
        }

        fn is_good_enough(&self, score: Score) -> bool {
            score == 0
        }

        fn is_better(&self, a: Score, b: Score) -> bool {
            a < b
        }

        fn is_search_done(&self, current: Score, neighbor: Score) -> bool {
            neighbor >= current
        }
    }

    impl EvolutionaryProblemSpace for OneMax {
        fn initial_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Vec<bool>> {
            (0..size).map(|_| self.initial_state(rng)).collect()
        }

        fn fitness(&self, bits: &Vec<bool>) -> Score {
            self.n as Score - self.evaluate(bits)
        }

        fn is_fit_enough(&self, bits: &Vec<bool>) -> bool {
            self.evaluate(bits) == 0
        }

        fn most_fit<'p>(&self, population: &'p [Vec<bool>]) -> Option<&'p Vec<bool>> {
            population
                .iter()
                .min_by_key(|s| std::cmp::Reverse(self.fitness(s)))
        }

        fn mutation_rate(&self) -> f64 {
            0.3
        }

        fn mutate<R: Rng>(&self, bits: &Vec<bool>, rng: &mut R) -> Vec<bool> {
            let mut next = bits.clone();
            let i = rng.random_range(0..next.len());
            next[i] = !next[i];
            next
        }

        fn reproduce<R: Rng>(&self, x: &Vec<bool>, y: &Vec<bool>, rng: &mut R) -> Vec<bool> {
            let cut = rng.random_range(0..x.len());
            x[..=cut].iter().chain(&y[cut + 1..]).copied().collect()
        }

        fn select<'p, R: Rng>(&self, population: &'p [Vec<bool>], rng: &mut R) -> &'p Vec<bool> {
            // binary tournament keeps the toy problem independent of the puzzle
            let a = &population[rng.random_range(0..population.len())];
            let b = &population[rng.random_range(0..population.len())];
            if self.fitness(a) >= self.fitness(b) {
                a
            } else {
                b
            }
        }

        fn select_with_fitness<'p, R: Rng>(
            &self,
            population: &'p [Vec<bool>],
            fitness: &[Score],
            rng: &mut R,
        ) -> &'p Vec<bool> {
            assert_eq!(fitness.len(), population.len());
            for (member, &f) in population.iter().zip(fitness) {
                assert_eq!(f, self.fitness(member), "stale fitness for {member:?}");
            }
            let a = rng.random_range(0..population.len());
            let b = rng.random_range(0..population.len());
            if fitness[a] >= fitness[b] {
                &population[a]
            } else {
                &population[b]
            }
        }
    }

    // ---- OneMax variant that never accepts a champion ----

    struct NeverFit(OneMax);

    impl ProblemSpace for NeverFit {
        type State = Vec<bool>;

        fn evaluate(&self, s: &Vec<bool>) -> Score {
            self.0.evaluate(s)
        }

        fn successors(&self, s: &Vec<bool>) -> Vec<Vec<bool>> {
            self.0.successors(s)
        }

        fn initial_state<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
            self.0.initial_state(rng)
        }

        fn is_good_enough(&self, _score: Score) -> bool {
            false
        }

        fn is_better(&self, a: Score, b: Score) -> bool {
            a < b
        }

        fn is_search_done(&self, current: Score, neighbor: Score) -> bool {
            neighbor >= current
        }
    }

    impl EvolutionaryProblemSpace for NeverFit {
        fn initial_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Vec<bool>> {
            self.0.initial_population(size, rng)
        }

        fn fitness(&self, s: &Vec<bool>) -> Score {
            self.0.fitness(s)
        }

        fn is_fit_enough(&self, _s: &Vec<bool>) -> bool {
            false
        }

        fn most_fit<'p>(&self, population: &'p [Vec<bool>]) -> Option<&'p Vec<bool>> {
            self.0.most_fit(population)
        }

        fn mutation_rate(&self) -> f64 {
            self.0.mutation_rate()
        }

        fn mutate<R: Rng>(&self, s: &Vec<bool>, rng: &mut R) -> Vec<bool> {
            self.0.mutate(s, rng)
        }

        fn reproduce<R: Rng>(&self, x: &Vec<bool>, y: &Vec<bool>, rng: &mut R) -> Vec<bool> {
            self.0.reproduce(x, y, rng)
        }

        fn select<'p, R: Rng>(&self, population: &'p [Vec<bool>], rng: &mut R) -> &'p Vec<bool> {
            self.0.select(population, rng)
        }
    }

    #[test]
    fn test_onemax_converges() {
        let problem = OneMax { n: 16 };
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(5_000)
            .with_seed(42);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert!(result.converged, "history: {} generations", result.generations);
        assert!(result.best.iter().all(|&b| b));
        assert_eq!(result.best_fitness, 16);
        assert_eq!(result.history.len(), result.generations);
    }

    #[test]
    fn test_generation_cap() {
        let problem = NeverFit(OneMax { n: 8 });
        let config = GaConfig::default()
            .with_population_size(6)
            .with_max_generations(25)
            .with_seed(1);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert!(!result.converged);
        assert!(!result.cancelled);
        assert!(!result.timed_out);
        assert_eq!(result.generations, 25);
        assert_eq!(result.history.len(), 25);
    }

    #[test]
    fn test_population_size_is_preserved() {
        let problem = NeverFit(OneMax { n: 8 });
        let config = GaConfig::default()
            .with_population_size(7)
            .with_max_generations(15)
            .with_seed(3);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert!(result.history.iter().all(|s| s.population_size == 7));
    }

    #[test]
    fn test_champion_dominates_mean() {
        let problem = NeverFit(OneMax { n: 12 });
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(40)
            .with_seed(8);

        let result = GaRunner::run(&problem, &config).unwrap();

        for stats in &result.history {
            assert!(stats.best_fitness as f64 >= stats.mean_fitness, "{stats:?}");
        }
        let best_seen = result.history.iter().map(|s| s.best_fitness).max().unwrap();
        assert!(result.best_fitness >= best_seen);
    }

    #[test]
    fn test_cancelled_before_first_generation() {
        let problem = OneMax { n: 64 };
        let config = GaConfig::default().with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));

        let result = GaRunner::run_with_cancel(&problem, &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert!(result.history.is_empty());
    }

    #[test]
    fn test_cancellation_from_another_thread() {
        let problem = NeverFit(OneMax { n: 20 });
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(usize::MAX)
            .with_seed(42);

        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result = GaRunner::run_with_cancel(&problem, &config, Some(cancel)).unwrap();

        assert!(result.cancelled, "expected cancelled result");
        assert!(!result.converged);
    }

    #[test]
    fn test_time_limit() {
        let problem = NeverFit(OneMax { n: 20 });
        let config = GaConfig::default()
            .with_max_generations(usize::MAX)
            .with_time_limit_ms(20)
            .with_seed(42);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert!(result.timed_out);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let problem = OneMax { n: 4 };
        let config = GaConfig::default().with_population_size(0);
        let err = GaRunner::run(&problem, &config).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn test_same_seed_same_run() {
        let problem = NeverFit(OneMax { n: 10 });
        let config = GaConfig::default().with_max_generations(30).with_seed(77);
        let a = GaRunner::run(&problem, &config).unwrap();
        let b = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_puzzle_with_few_blanks_converges() {
        let grid: Grid = "4\n0234\n3412\n2103\n4320\n".parse().unwrap();
        let problem = PuzzleEvolutionaryProblem::from_grid(grid);
        let config = GaConfig::default().with_seed(5);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert!(result.converged);
        assert_eq!(problem.evaluate(&result.best), 0);
        assert_eq!(result.best_fitness, problem.max_conflicts());
    }

    #[test]
    fn test_puzzle_without_blanks() {
        let grid: Grid = "4\n1234\n3412\n2143\n4321\n".parse().unwrap();
        let problem = PuzzleEvolutionaryProblem::from_grid(grid);
        let result = GaRunner::run(&problem, &GaConfig::default().with_seed(0)).unwrap();

        assert!(result.best.is_empty());
        assert!(result.converged);
        assert_eq!(result.generations, 0);
    }
}
