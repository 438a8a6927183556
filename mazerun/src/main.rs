//! Mazerun — parallel A* maze-solving batch runner.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use mazerun_lib::config::RunConfig;
use mazerun_lib::error::{MazerunError, Result};
use mazerun_lib::mapgen::random_maze_task;
use mazerun_lib::solver::MazeTask;
use mazerun_lib::stats::GlobalStats;
use mazerun_lib::Pool;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mazerun=info".parse().unwrap())
                .add_directive("mazerun_lib=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = match arg_value(&args, "--config") {
        Some(path) => {
            info!("Loading configuration from {path}");
            RunConfig::load(Path::new(&path))?
        }
        None if Path::new("mazerun.toml").exists() => {
            info!("Loading configuration from mazerun.toml");
            RunConfig::load(Path::new("mazerun.toml"))?
        }
        None => {
            info!("Using default configuration");
            RunConfig::default()
        }
    };

    if let Some(v) = arg_value(&args, "--workers") {
        config.workers = v
            .parse()
            .map_err(|_| MazerunError::Config(format!("invalid --workers value: {v}")))?;
    }
    if let Some(v) = arg_value(&args, "--seed") {
        let seed = v
            .parse()
            .map_err(|_| MazerunError::Config(format!("invalid --seed value: {v}")))?;
        config.seed = Some(seed);
    }

    info!("mazerun v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "{} mazes, {} workers{}",
        config.mazes.len(),
        config.workers,
        if config.reopen_closed {
            " (closed-cell reopening on)"
        } else {
            ""
        }
    );

    let mut rng = match config.seed {
        Some(seed) => {
            info!("Seeding maze generation with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => rand::make_rng::<StdRng>(),
    };

    let tasks: Vec<MazeTask> = config
        .mazes
        .iter()
        .map(|spec| random_maze_task(spec.size, spec.density, &mut rng))
        .collect();

    let results = Pool::new(config.workers)
        .with_reopening(config.reopen_closed)
        .run(tasks)?;

    println!("{}", GlobalStats::reduce(&results));
    Ok(())
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
