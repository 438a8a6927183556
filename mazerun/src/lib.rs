//! Mazerun — parallel A* maze-solving batch runner.
//!
//! Generates random occupancy mazes, solves each with A* over
//! 8-connected movement, and runs the whole batch on a fixed-size worker
//! pool. Per-task results are collected through a channel and reduced
//! into global statistics only after every worker has joined, so the
//! aggregate is identical for any pool size.

pub mod batch;
pub mod config;
pub mod error;
pub mod mapgen;
pub mod solver;
pub mod stats;

pub use batch::Pool;
pub use config::{MazeSpec, RunConfig};
pub use error::{MazerunError, Result};
pub use mapgen::{MazeGen, random_maze_task};
pub use solver::{MazeTask, OccupancyPather, TaskResult, solve};
pub use stats::GlobalStats;
