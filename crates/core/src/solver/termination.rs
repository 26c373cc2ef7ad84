//! Steady-state detection

use crate::config::SimulationConfig;
use crate::core_types::CellState;
use crate::grid::Grid;

/// Whether further generations can no longer change `grid`
///
/// True once nothing is burning and either no tree is left or trees cannot
/// ignite on their own. Stepping past this point is still safe: it only
/// produces empty cells and unchanged trees (or, with a positive ignition
/// probability and trees left, the predicate is false to begin with).
pub fn is_terminal(grid: &Grid, config: &SimulationConfig) -> bool {
    !grid.contains(CellState::Burning)
        && (!grid.contains(CellState::Tree) || !config.allows_spontaneous_ignition())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(p: f64) -> SimulationConfig {
        SimulationConfig {
            spontaneous_ignition_probability: p,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_burning_grid_is_not_terminal() {
        let grid = Grid::parse("T*\n..").unwrap();
        assert!(!is_terminal(&grid, &config(0.0)));
        assert!(!is_terminal(&grid, &config(0.1)));
    }

    #[test]
    fn test_all_empty_is_terminal() {
        let grid = Grid::empty(4);
        assert!(is_terminal(&grid, &config(0.0)));
        assert!(is_terminal(&grid, &config(0.5)));
    }

    #[test]
    fn test_trees_without_ignition_are_terminal() {
        let grid = Grid::parse("TT\n.T").unwrap();
        assert!(is_terminal(&grid, &config(0.0)));
        assert!(!is_terminal(&grid, &config(0.001)));
    }
}
