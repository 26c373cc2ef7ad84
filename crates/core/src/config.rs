//! Simulation parameters
//!
//! A [`SimulationConfig`] is fixed before a run starts and never changes during
//! it. All fields have defaults (`#[serde(default)]`), so a config file only
//! needs to list the values it overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How the per-cell rule is evaluated within one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStrategy {
    /// Single thread, row-major, one draw from the caller's rng per tree
    #[default]
    Sequential,
    /// Rows are computed on rayon workers with per-row generators
    Parallel,
}

/// Immutable parameters for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid side length in cells
    pub size: usize,
    /// Probability that a cell starts as a tree
    pub tree_density: f64,
    /// Per-tree, per-generation chance of igniting without a burning neighbor
    pub spontaneous_ignition_probability: f64,
    /// Upper bound on generations
    pub max_generations: u32,
    /// Cells forced to burn at start. Empty means the center cell.
    pub ignition_seeds: Vec<(usize, usize)>,
    /// Sequential or rayon-parallel stepping
    pub update_strategy: UpdateStrategy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: 50,
            tree_density: 0.6,
            spontaneous_ignition_probability: 0.001,
            max_generations: 100,
            ignition_seeds: Vec::new(),
            update_strategy: UpdateStrategy::Sequential,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: zero size, a density outside
    /// `[0, 1]`, an ignition probability outside `[0, 1)`, a zero generation
    /// cap, or an ignition seed outside the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        if !(0.0..=1.0).contains(&self.tree_density) {
            return Err(ConfigError::InvalidTreeDensity(self.tree_density));
        }
        if !(0.0..1.0).contains(&self.spontaneous_ignition_probability) {
            return Err(ConfigError::InvalidIgnitionProbability(
                self.spontaneous_ignition_probability,
            ));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::InvalidMaxGenerations(self.max_generations));
        }
        if let Some(&(row, col)) = self
            .ignition_seeds
            .iter()
            .find(|&&(r, c)| r >= self.size || c >= self.size)
        {
            return Err(ConfigError::IgnitionSeedOutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Ignition coordinates, falling back to the center cell
    pub fn ignition_points(&self) -> Vec<(usize, usize)> {
        if self.ignition_seeds.is_empty() {
            vec![(self.size / 2, self.size / 2)]
        } else {
            self.ignition_seeds.clone()
        }
    }

    /// Whether trees can still catch fire with no burning neighbor
    #[inline]
    pub fn allows_spontaneous_ignition(&self) -> bool {
        self.spontaneous_ignition_probability > 0.0
    }
}
