//! Error types for simulation setup.
//!
//! Errors only arise before a run starts. Stepping a valid grid is a total
//! function; an out-of-bounds cell access during a step is a bug and panics.

use thiserror::Error;

/// Invalid simulation configuration, detected before any generation runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid side length must be at least one cell
    #[error("grid size must be positive, got {0}")]
    InvalidSize(usize),

    /// Tree density is a probability
    #[error("tree density must be within [0, 1], got {0}")]
    InvalidTreeDensity(f64),

    /// Spontaneous ignition probability must be in `[0, 1)`
    #[error("spontaneous ignition probability must be within [0, 1), got {0}")]
    InvalidIgnitionProbability(f64),

    /// Generation cap must be at least one
    #[error("max generations must be positive, got {0}")]
    InvalidMaxGenerations(u32),

    /// An ignition seed lies outside the grid
    #[error("ignition seed ({row}, {col}) is outside a {size}x{size} grid")]
    IgnitionSeedOutOfBounds { row: usize, col: usize, size: usize },

    /// A supplied starting grid does not match the configured size
    #[error("starting grid is {rows}x{cols} but config size is {size}")]
    GridSizeMismatch {
        rows: usize,
        cols: usize,
        size: usize,
    },
}

/// Failure building a [`Grid`](crate::Grid) from rows or text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },

    #[error("{rows}x{cols} grid needs {expected} cells, found {found}", expected = .rows.saturating_mul(*.cols))]
    CellCount {
        rows: usize,
        cols: usize,
        found: usize,
    },
}
