//! Random maze generation.
//!
//! Obstacles are sprinkled by independently sampling uniform random
//! cells. Duplicate samples overwrite, so the real obstacle count can
//! land slightly below the requested number.

use mazerun_core::{Cell, Grid, Point};
use rand::Rng;
use rand::RngExt;

use crate::solver::MazeTask;

/// Maze generator operating on an occupancy [`Grid`].
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub grid: Grid,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator over a fresh all-free grid.
    pub fn new(width: i32, height: i32, rng: R) -> Self {
        Self {
            rng,
            grid: Grid::new(width, height),
        }
    }

    /// Sprinkle up to `samples` obstacles at uniformly random cells.
    ///
    /// Returns the number of cells newly blocked.
    pub fn sprinkle_obstacles(&mut self, samples: usize) -> usize {
        let w = self.grid.width();
        let h = self.grid.height();
        let mut blocked = 0;
        for _ in 0..samples {
            let p = Point::new(
                self.rng.random_range(0..w),
                self.rng.random_range(0..h),
            );
            if self.grid.at(p) != Some(Cell::Blocked) {
                blocked += 1;
            }
            self.grid.set(p, Cell::Blocked);
        }
        blocked
    }

    /// Carve the given cells free.
    pub fn carve(&mut self, points: &[Point]) {
        for &p in points {
            self.grid.set(p, Cell::Free);
        }
    }

    /// Finish and take the grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Build a task for a random square maze: obstacles over `density` of the
/// cells, start in the top-left corner, goal in the bottom-right.
///
/// Start and goal are carved free so the task always satisfies the
/// search preconditions.
pub fn random_maze_task<R: Rng>(size: i32, density: f64, rng: &mut R) -> MazeTask {
    let samples = ((size as f64) * (size as f64) * density) as usize;
    let start = Point::new(0, 0);
    let goal = Point::new(size - 1, size - 1);

    let mut mapgen = MazeGen::new(size, size, rng);
    mapgen.sprinkle_obstacles(samples);
    mapgen.carve(&[start, goal]);

    MazeTask {
        grid: mapgen.into_grid(),
        start,
        goal,
    }
}
