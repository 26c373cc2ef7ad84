//! Built-in starting grids

use super::Grid;
use crate::core_types::CellState::{Burning as F, Empty as E, Tree as T};

/// Small 5×5 demonstration forest with four burning cells around the center
///
/// ```text
/// .TTT.
/// TT*TT
/// T*T*T
/// TT*TT
/// .TTT.
/// ```
pub fn sample_forest() -> Grid {
    #[rustfmt::skip]
    let cells = vec![
        E, T, T, T, E,
        T, T, F, T, T,
        T, F, T, F, T,
        T, T, F, T, T,
        E, T, T, T, E,
    ];
    Grid::from_cells(5, 5, cells)
}

/// Look up a preset by name
pub fn by_name(name: &str) -> Option<Grid> {
    match name.to_lowercase().as_str() {
        "sample" | "sample-forest" | "sample_forest" => Some(sample_forest()),
        _ => None,
    }
}
