//! Grid state: the cell values of one simulation instant

pub mod cell_grid;
pub mod presets;

// Re-export main types
pub use cell_grid::{Grid, GridStats};
