//! Fixed-size worker pool for running independent maze tasks.
//!
//! Tasks fan out over a channel to named worker threads and fan back in
//! as `(index, result)` pairs. Each worker owns its own [`PathArena`] and
//! each task owns its grid, so no search state is shared. Joining every
//! worker before returning is the barrier that makes the caller's
//! reduction race-free.

use std::thread;

use crossbeam_channel as channel;
use tracing::{info, warn};

use mazerun_core::Range;
use mazerun_paths::PathArena;

use crate::error::{MazerunError, Result};
use crate::solver::{self, MazeTask, TaskResult};

/// A fixed-size pool of search workers.
#[derive(Debug, Clone)]
pub struct Pool {
    workers: usize,
    reopen: bool,
}

impl Pool {
    /// Create a pool with the given number of workers.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            reopen: false,
        }
    }

    /// Run searches with closed-cell reopening enabled.
    pub fn with_reopening(mut self, reopen: bool) -> Self {
        self.reopen = reopen;
        self
    }

    /// Run every task and return one result per task, in input order.
    ///
    /// Fails before any task runs when the pool size is zero, the task
    /// list is empty, or a task's endpoints violate the search
    /// preconditions. A worker lost mid-task (panic) yields failed
    /// results for whatever it did not finish; the batch still completes.
    pub fn run(&self, tasks: Vec<MazeTask>) -> Result<Vec<TaskResult>> {
        if self.workers == 0 {
            return Err(MazerunError::Config(
                "worker pool size must be positive".into(),
            ));
        }
        if tasks.is_empty() {
            return Err(MazerunError::Config("no tasks to run".into()));
        }
        for (index, task) in tasks.iter().enumerate() {
            if let Err(reason) = task.validate() {
                return Err(MazerunError::InvalidTask { index, reason });
            }
        }

        let total = tasks.len();
        let workers = self.workers.min(total);
        let reopen = self.reopen;

        let (task_tx, task_rx) = channel::unbounded::<(usize, MazeTask)>();
        let (result_tx, result_rx) = channel::unbounded::<(usize, TaskResult)>();

        // The receiver is still in scope, so these sends cannot fail.
        for pair in tasks.into_iter().enumerate() {
            task_tx.send(pair).expect("task queue receiver alive");
        }
        drop(task_tx);

        let mut handles = Vec::with_capacity(workers);
        for wid in 0..workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("search-{wid}"))
                .spawn(move || {
                    let mut arena = PathArena::new(Range::default());
                    arena.set_reopening(reopen);
                    while let Ok((index, task)) = task_rx.recv() {
                        let result = solver::solve(&task, &mut arena);
                        info!(
                            "maze {} ({}x{}): path length {} nodes",
                            index + 1,
                            task.grid.width(),
                            task.grid.height(),
                            result.path_len
                        );
                        if result_tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                })
                .expect("failed to spawn search worker");
            handles.push(handle);
        }
        drop(task_rx);
        drop(result_tx);

        // Fan-in: the channel disconnects once every worker has exited.
        let mut results: Vec<Option<TaskResult>> = vec![None; total];
        while let Ok((index, result)) = result_rx.recv() {
            results[index] = Some(result);
        }

        // Join barrier: nothing may be reduced before every worker is done.
        for handle in handles {
            if handle.join().is_err() {
                warn!("a search worker panicked; its unfinished tasks count as failed");
            }
        }

        Ok(results
            .into_iter()
            .map(|r| r.unwrap_or(TaskResult::FAILED))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::random_maze_task;
    use crate::stats::GlobalStats;
    use mazerun_core::{Cell, Grid, Point};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// A fixed batch: same seed, same grids, every time.
    fn seeded_tasks() -> Vec<MazeTask> {
        let mut rng = StdRng::seed_from_u64(7);
        [30, 40, 50, 25, 35]
            .into_iter()
            .map(|size| random_maze_task(size, 0.2, &mut rng))
            .collect()
    }

    #[test]
    fn identical_stats_across_pool_sizes() {
        // The regression test for the shared-counter race: any pool size
        // must produce the same aggregate over the same grids.
        let baseline = GlobalStats::reduce(&Pool::new(1).run(seeded_tasks()).unwrap());
        assert_eq!(baseline.attempts, 5);
        assert!(baseline.successes <= baseline.attempts);
        for workers in [2, 4, 8] {
            let results = Pool::new(workers).run(seeded_tasks()).unwrap();
            assert_eq!(GlobalStats::reduce(&results), baseline);
        }
    }

    #[test]
    fn results_come_back_in_input_order() {
        let open = MazeTask {
            grid: Grid::new(10, 10),
            start: Point::new(0, 0),
            goal: Point::new(9, 9),
        };
        let mut walled = MazeTask {
            grid: Grid::new(10, 10),
            start: Point::new(0, 0),
            goal: Point::new(9, 9),
        };
        for y in 0..10 {
            walled.grid.set(Point::new(5, y), Cell::Blocked);
        }

        let results = Pool::new(4)
            .run(vec![open.clone(), walled, open])
            .unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].found);
        assert!(!results[1].found);
        assert_eq!(results[1].path_len, 0);
        assert!(results[2].found);
        assert_eq!(results[0], results[2]);
    }

    #[test]
    fn zero_workers_is_a_config_error() {
        let err = Pool::new(0).run(seeded_tasks()).unwrap_err();
        assert!(matches!(err, MazerunError::Config(_)));
    }

    #[test]
    fn empty_batch_is_a_config_error() {
        let err = Pool::new(4).run(Vec::new()).unwrap_err();
        assert!(matches!(err, MazerunError::Config(_)));
    }

    #[test]
    fn invalid_endpoints_are_rejected_before_any_run() {
        let mut tasks = seeded_tasks();
        tasks[2].goal = Point::new(-1, 0);
        let err = Pool::new(4).run(tasks).unwrap_err();
        assert!(matches!(err, MazerunError::InvalidTask { index: 2, .. }));
    }

    #[test]
    fn more_workers_than_tasks_is_fine() {
        let results = Pool::new(16).run(seeded_tasks()).unwrap();
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn reopening_pool_never_does_worse() {
        let default_stats = GlobalStats::reduce(&Pool::new(4).run(seeded_tasks()).unwrap());
        let reopening_stats = GlobalStats::reduce(
            &Pool::new(4)
                .with_reopening(true)
                .run(seeded_tasks())
                .unwrap(),
        );
        // Reopening can only improve reachability, never lose it.
        assert!(reopening_stats.successes >= default_stats.successes);
        assert_eq!(reopening_stats.attempts, default_stats.attempts);
    }
}
