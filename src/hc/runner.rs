//! Hill-climbing restart loop.
//!
//! # Algorithm
//!
//! 1. **Restarting**: draw a fresh initial state
//! 2. **Climbing**: rank the successors, move to the best one while it is
//!    strictly better than the current state
//! 3. **Local optimum**: no successors, or the best one does not improve;
//!    keep the climb's result if it beats the best so far
//! 4. **Done** once the best is good enough or `max_restarts + 1` climbs
//!    have run; otherwise go back to 1

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::HcConfig;
use crate::space::{ProblemSpace, Score};

/// Result of a hill-climbing run.
#[derive(Debug, Clone)]
pub struct HcResult<S: Clone> {
    /// Best local optimum found across all climbs.
    pub best: S,

    /// Score of `best`.
    pub best_score: Score,

    /// Number of climbs performed (at least 1).
    pub restarts: usize,

    /// Accepted moves summed over all climbs.
    pub steps: usize,

    /// Best score after each climb.
    pub score_history: Vec<Score>,
}

/// Trace of one climb from a start state to a local optimum.
#[derive(Debug, Clone)]
pub struct Climb<S: Clone> {
    /// Where the climb stopped.
    pub state: S,

    /// Score of the start state followed by the score of every accepted
    /// move. Strictly decreasing under a minimizing `is_better`.
    pub scores: Vec<Score>,
}

impl<S: Clone> Climb<S> {
    /// Score of the final state.
    pub fn score(&self) -> Score {
        self.scores[self.scores.len() - 1]
    }

    /// Accepted moves.
    pub fn steps(&self) -> usize {
        self.scores.len() - 1
    }
}

enum Phase<S: Clone> {
    Restarting,
    Climbing(S),
    LocalOptimum(Climb<S>),
    Done(HcResult<S>),
}

/// Executes random-restart hill climbing.
///
/// # Usage
///
/// ```ignore
/// let problem = PuzzleProblem::new(grid);
/// let config = HcConfig::default().with_seed(42);
/// let result = HcRunner::run(&problem, &config);
/// println!("Final value: {}", result.best_score);
/// ```
pub struct HcRunner;

impl HcRunner {
    /// Runs hill climbing with a generator seeded from `config.seed`.
    pub fn run<P: ProblemSpace>(problem: &P, config: &HcConfig) -> HcResult<P::State> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs hill climbing drawing every random start from `rng`.
    pub fn run_with_rng<P: ProblemSpace, R: Rng>(
        problem: &P,
        config: &HcConfig,
        rng: &mut R,
    ) -> HcResult<P::State> {
        let climbs_allowed = config.max_restarts.saturating_add(1);
        let mut best: Option<(P::State, Score)> = None;
        let mut restarts = 0usize;
        let mut steps = 0usize;
        let mut score_history = Vec::with_capacity(climbs_allowed.min(1024));

        let mut phase = Phase::Restarting;
        loop {
            phase = match phase {
                Phase::Restarting => {
                    restarts += 1;
                    log::info!("climb {restarts} of at most {climbs_allowed}");
                    Phase::Climbing(problem.initial_state(rng))
                }
                Phase::Climbing(start) => {
                    Phase::LocalOptimum(Self::climb(problem, start, config.max_climb_steps))
                }
                Phase::LocalOptimum(climb) => {
                    let score = climb.score();
                    let moves = climb.steps();
                    steps += moves;

                    let (state, best_score) = match best.take() {
                        Some((prev, prev_score)) if !problem.is_better(score, prev_score) => {
                            (prev, prev_score)
                        }
                        _ => (climb.state, score),
                    };
                    score_history.push(best_score);
                    log::info!(
                        "climb {restarts} stopped at {score} after {moves} moves; best {best_score}"
                    );

                    if problem.is_good_enough(best_score) || restarts >= climbs_allowed {
                        Phase::Done(HcResult {
                            best: state,
                            best_score,
                            restarts,
                            steps,
                            score_history: std::mem::take(&mut score_history),
                        })
                    } else {
                        best = Some((state, best_score));
                        Phase::Restarting
                    }
                }
                Phase::Done(result) => {
                    log::info!(
                        "hill climbing done: best {} after {} climbs",
                        result.best_score,
                        result.restarts
                    );
                    return result;
                }
            };
        }
    }

    /// Climbs from `start` until no successor is strictly better.
    ///
    /// `max_steps` caps accepted moves; 0 = no limit.
    pub fn climb<P: ProblemSpace>(
        problem: &P,
        start: P::State,
        max_steps: usize,
    ) -> Climb<P::State> {
        let mut current = start;
        let mut current_score = problem.evaluate(&current);
        let mut scores = vec![current_score];

        loop {
            if max_steps > 0 && scores.len() > max_steps {
                log::debug!("step cap {max_steps} reached at {current_score}");
                break;
            }

            let neighbors = problem.successors(&current);
            let Some(neighbor) = problem.rank_best_first(neighbors).into_iter().next() else {
                log::debug!("no successors at {current_score}");
                break;
            };

            let neighbor_score = problem.evaluate(&neighbor);
            if !problem.is_better(neighbor_score, current_score) {
                break;
            }

            current = neighbor;
            current_score = neighbor_score;
            scores.push(current_score);
            log::debug!(
                "step {}: chosen {:?}, value {current_score}",
                scores.len() - 1,
                current
            );
        }

        Climb {
            state: current,
            scores,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
