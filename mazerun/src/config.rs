//! Configuration loading for mazerun.

use crate::error::{MazerunError, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    /// Mazes to generate and solve, in submission order.
    #[serde(default = "default_mazes")]
    pub mazes: Vec<MazeSpec>,

    /// Worker pool size (default: 4)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Seed for maze generation; drawn from OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Allow A* to reopen finalized cells when a cheaper route appears.
    #[serde(default)]
    pub reopen_closed: bool,
}

/// One maze descriptor: a square grid plus obstacle density.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MazeSpec {
    /// Side length of the square grid.
    pub size: i32,

    /// Fraction of cells sampled as obstacles (default: 0.2).
    /// Duplicate samples overwrite, so the true density lands slightly
    /// below this value.
    #[serde(default = "default_density")]
    pub density: f64,
}

impl MazeSpec {
    /// Number of obstacle samples to draw for this maze.
    pub fn obstacle_samples(&self) -> usize {
        let cells = (self.size as f64) * (self.size as f64);
        (cells * self.density) as usize
    }
}

fn default_mazes() -> Vec<MazeSpec> {
    [100, 500, 1000]
        .into_iter()
        .map(|size| MazeSpec {
            size,
            density: default_density(),
        })
        .collect()
}

fn default_workers() -> usize {
    4
}

fn default_density() -> f64 {
    0.2
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mazes: default_mazes(),
            workers: default_workers(),
            seed: None,
            reopen_closed: false,
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject descriptors the generator cannot honor.
    pub fn validate(&self) -> Result<()> {
        for (i, spec) in self.mazes.iter().enumerate() {
            if spec.size < 1 {
                return Err(MazerunError::Config(format!(
                    "maze {}: size must be at least 1, got {}",
                    i, spec.size
                )));
            }
            if !(0.0..=1.0).contains(&spec.density) {
                return Err(MazerunError::Config(format!(
                    "maze {}: density must be within [0, 1], got {}",
                    i, spec.density
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = RunConfig::default();
        assert_eq!(config.workers, 4);
        assert_eq!(config.seed, None);
        assert!(!config.reopen_closed);
        let sizes: Vec<i32> = config.mazes.iter().map(|m| m.size).collect();
        assert_eq!(sizes, vec![100, 500, 1000]);
        assert!(config.mazes.iter().all(|m| m.density == 0.2));
    }

    #[test]
    fn obstacle_samples_is_a_fifth_of_cells() {
        let spec = MazeSpec {
            size: 100,
            density: 0.2,
        };
        assert_eq!(spec.obstacle_samples(), 2000);
    }

    #[test]
    fn toml_fields_override_defaults() {
        let config: RunConfig = toml::from_str(
            r#"
            workers = 8
            seed = 42
            reopen_closed = true

            [[mazes]]
            size = 50

            [[mazes]]
            size = 60
            density = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.seed, Some(42));
        assert!(config.reopen_closed);
        assert_eq!(config.mazes.len(), 2);
        assert_eq!(config.mazes[0].density, 0.2);
        assert_eq!(config.mazes[1].density, 0.1);
    }

    #[test]
    fn rejects_bad_descriptors() {
        let config: RunConfig = toml::from_str(
            r#"
            [[mazes]]
            size = 0
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(MazerunError::Config(_))
        ));

        let config: RunConfig = toml::from_str(
            r#"
            [[mazes]]
            size = 10
            density = 1.5
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(MazerunError::Config(_))
        ));
    }
}
