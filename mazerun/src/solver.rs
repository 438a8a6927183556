//! Single-maze solving: the occupancy pather and task/result types.

use mazerun_core::{Grid, Point};
use mazerun_paths::{AstarPather, PathArena, Pather, WeightedPather, euclidean};

/// 8-connected movement over an occupancy grid.
///
/// Step costs are Euclidean: 1.0 for orthogonal moves, √2 for diagonal
/// ones. The heuristic is the Euclidean distance to the goal, which never
/// overestimates the remaining cost under this step metric.
pub struct OccupancyPather<'a> {
    pub grid: &'a Grid,
}

impl Pather for OccupancyPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for np in p.neighbors_8() {
            if self.grid.is_free(np) {
                buf.push(np);
            }
        }
    }
}

impl WeightedPather for OccupancyPather<'_> {
    fn cost(&self, from: Point, to: Point) -> f64 {
        euclidean(from, to)
    }
}

impl AstarPather for OccupancyPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        euclidean(from, to)
    }
}

/// One independent search task: a privately owned grid plus endpoints.
///
/// Tasks never share state; each worker searches its own grid.
#[derive(Debug, Clone)]
pub struct MazeTask {
    pub grid: Grid,
    pub start: Point,
    pub goal: Point,
}

impl MazeTask {
    /// Check the search preconditions: both endpoints in bounds and on a
    /// free cell.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, p) in [("start", self.start), ("goal", self.goal)] {
            if !self.grid.contains(p) {
                return Err(format!("{name} {p} is out of bounds"));
            }
            if !self.grid.is_free(p) {
                return Err(format!("{name} {p} is on a blocked cell"));
            }
        }
        Ok(())
    }
}

/// The only state a task exposes outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskResult {
    /// Number of nodes on the path, 0 when no path was found.
    pub path_len: usize,
    /// Whether a path was found.
    pub found: bool,
}

impl TaskResult {
    /// Result recorded for a task whose worker died before reporting.
    pub(crate) const FAILED: Self = Self {
        path_len: 0,
        found: false,
    };
}

/// Solve one task, reusing the given arena's storage.
///
/// "No path" is a normal outcome, reported through `found`, never an
/// error.
pub fn solve(task: &MazeTask, arena: &mut PathArena) -> TaskResult {
    arena.set_range(task.grid.bounds());
    let pather = OccupancyPather { grid: &task.grid };
    match arena.astar_path(&pather, task.start, task.goal) {
        Some(path) => TaskResult {
            path_len: path.len(),
            found: true,
        },
        None => TaskResult {
            path_len: 0,
            found: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazerun_core::{Cell, Range};

    fn task_on_open_grid(size: i32) -> MazeTask {
        MazeTask {
            grid: Grid::new(size, size),
            start: Point::new(0, 0),
            goal: Point::new(size - 1, size - 1),
        }
    }

    #[test]
    fn solves_open_grid() {
        let task = task_on_open_grid(8);
        let mut arena = PathArena::new(Range::default());
        let result = solve(&task, &mut arena);
        assert!(result.found);
        assert_eq!(result.path_len, 8);
    }

    #[test]
    fn reports_unreachable_goal_as_not_found() {
        let mut task = task_on_open_grid(6);
        // Wall the goal corner off completely.
        for p in [Point::new(4, 5), Point::new(4, 4), Point::new(5, 4)] {
            task.grid.set(p, Cell::Blocked);
        }
        let mut arena = PathArena::new(Range::default());
        let result = solve(&task, &mut arena);
        assert!(!result.found);
        assert_eq!(result.path_len, 0);
    }

    #[test]
    fn validate_flags_bad_endpoints() {
        let mut task = task_on_open_grid(4);
        task.goal = Point::new(4, 4);
        assert!(task.validate().unwrap_err().contains("out of bounds"));

        let mut task = task_on_open_grid(4);
        task.grid.set(task.start, Cell::Blocked);
        assert!(task.validate().unwrap_err().contains("blocked"));

        assert!(task_on_open_grid(4).validate().is_ok());
    }

    #[test]
    fn diagonal_steps_cost_sqrt_two() {
        let grid = Grid::new(3, 3);
        let pather = OccupancyPather { grid: &grid };
        let origin = Point::new(1, 1);
        assert_eq!(pather.cost(origin, Point::new(2, 1)), 1.0);
        assert_eq!(
            pather.cost(origin, Point::new(2, 2)),
            std::f64::consts::SQRT_2
        );
    }
}
