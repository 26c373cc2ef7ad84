//! Initial grid generation

use crate::config::SimulationConfig;
use crate::core_types::CellState;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::rng::RandomSource;
use tracing::info;

/// Build the starting grid for a run
///
/// Every cell is independently a tree with probability `tree_density` (one
/// Bernoulli draw per cell, row-major), then every ignition point is forced to
/// burn regardless of what was sampled there.
///
/// # Arguments
///
/// * `config` - Run parameters (validated here)
/// * `rng` - Random source, queried `size × size` times
///
/// # Errors
///
/// Returns a [`ConfigError`] if the config is invalid. Nothing is drawn from
/// `rng` in that case.
pub fn initialize<S: RandomSource + ?Sized>(
    config: &SimulationConfig,
    rng: &mut S,
) -> Result<Grid, ConfigError> {
    config.validate()?;

    let size = config.size;
    let cells = (0..size * size)
        .map(|_| {
            if rng.bernoulli(config.tree_density) {
                CellState::Tree
            } else {
                CellState::Empty
            }
        })
        .collect();
    let mut grid = Grid::from_cells(size, size, cells);

    let ignition_points = config.ignition_points();
    for &(row, col) in &ignition_points {
        grid.set(row, col, CellState::Burning);
    }

    let stats = grid.stats();
    info!(
        "Initialized {}x{} forest: {} trees, {} burning, {} empty (density {:.2})",
        size, size, stats.tree, stats.burning, stats.empty, config.tree_density
    );

    Ok(grid)
}
