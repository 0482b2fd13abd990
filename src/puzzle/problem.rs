//! Conflict-counting search space over a puzzle's blank cells.

use rand::Rng;

use super::cell::Cell;
use super::grid::Grid;
use crate::space::{ProblemSpace, Score};

/// Values tried by [`PuzzleProblem::successors`].
///
/// Random starts and mutations always draw from `1..=N`; only the
/// neighborhood is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborDomain {
    /// `1..=N` for an N×N grid.
    #[default]
    Dimension,

    /// `1..=min(k, N)`. `Fixed(4)` is the historical behavior, which only
    /// explores the full domain on 4×4 boards.
    Fixed(u32),
}

impl NeighborDomain {
    fn upper(self, dimension: usize) -> u32 {
        match self {
            NeighborDomain::Dimension => dimension as u32,
            NeighborDomain::Fixed(k) => k.min(dimension as u32),
        }
    }
}

/// The puzzle as a [`ProblemSpace`].
///
/// The base grid holds the fixed clues. A state is the blank-cell vector
/// from [`Grid::to_vector`] with candidate values filled in; its length and
/// order never change during a search.
///
/// # Examples
///
/// ```
/// use u_localsearch::puzzle::{Grid, PuzzleProblem};
/// use u_localsearch::space::ProblemSpace;
///
/// let grid: Grid = "4\n1234\n3412\n2143\n4321\n".parse().unwrap();
/// let problem = PuzzleProblem::new(grid);
/// assert_eq!(problem.evaluate(&Vec::new()), 0);
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleProblem {
    grid: Grid,
    domain: NeighborDomain,
}

impl PuzzleProblem {
    /// Creates a problem over `grid` with the default neighbor domain.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            domain: NeighborDomain::default(),
        }
    }

    /// Sets the successor value domain.
    pub fn with_neighbor_domain(mut self, domain: NeighborDomain) -> Self {
        self.domain = domain;
        self
    }

    /// The base grid (clues only).
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current successor value domain.
    pub fn neighbor_domain(&self) -> NeighborDomain {
        self.domain
    }

    /// The base grid with `state` written over it.
    pub fn solution(&self, state: &[Cell]) -> Grid {
        self.grid.merge_with_overrides(state)
    }

    /// Uniform value in `1..=N`.
    pub(crate) fn random_value<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(1..=self.grid.dimension() as u32)
    }
}

impl ProblemSpace for PuzzleProblem {
    type State = Vec<Cell>;

    /// Total conflict count of the merged board; `0` is a solution.
    fn evaluate(&self, state: &Vec<Cell>) -> Score {
        let board = self.grid.merge_with_overrides(state);
        let n = board.dimension();
        let mut total = 0;
        for y in (0..n).rev() {
            for x in 0..n {
                total += conflicts_at(&board, x, y);
            }
        }
        total
    }

    fn successors(&self, state: &Vec<Cell>) -> Vec<Vec<Cell>> {
        let upper = self.domain.upper(self.grid.dimension());
        let mut neighbors = Vec::with_capacity(state.len() * upper as usize);
        for (k, cell) in state.iter().enumerate() {
            for v in (1..=upper).filter(|&v| v != cell.value()) {
                let mut next = state.clone();
                next[k] = cell.with_value(v);
                neighbors.push(next);
            }
        }
        log::trace!("{} successors over {} cells", neighbors.len(), state.len());
        neighbors
    }

    fn initial_state<R: Rng>(&self, rng: &mut R) -> Vec<Cell> {
        self.grid
            .to_vector()
            .into_iter()
            .map(|cell| cell.with_value(self.random_value(rng)))
            .collect()
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

/// Same-value cells seen from `(x, y)`.
///
/// Row and column peers are counted in full. Box peers only count when
/// they differ in both coordinates, so a row or column duplicate that also
/// shares the box is not counted twice.
fn conflicts_at(board: &Grid, x: usize, y: usize) -> Score {
    let n = board.dimension();
    let b = board.box_size();
    let value = board.value(x, y);
    let mut count = 0;

    count += (0..n)
        .filter(|&x1| x1 != x && board.value(x1, y) == value)
        .count();
    count += (0..n)
        .filter(|&y1| y1 != y && board.value(x, y1) == value)
        .count();

    let (x0, y0) = ((x / b) * b, (y / b) * b);
    for x1 in x0..x0 + b {
        for y1 in y0..y0 + b {
            if x1 != x && y1 != y && board.value(x1, y1) == value {
                count += 1;
            }
        }
    }

    count as Score
}
