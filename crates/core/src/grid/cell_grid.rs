//! Dense 2D grid of cell states for one simulation instant
//!
//! A `Grid` owns every cell value for exactly one generation. Cells are stored
//! in row-major order; there is no sparse representation and no wraparound, so
//! cells on the border simply have fewer neighbors.

use crate::core_types::CellState;
use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Moore neighborhood offsets (row, col), excluding the cell itself
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Per-state cell counts for one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridStats {
    pub empty: usize,
    pub tree: usize,
    pub burning: usize,
}

impl GridStats {
    /// Total number of cells counted
    pub fn total(&self) -> usize {
        self.empty + self.tree + self.burning
    }

    /// Count for a single state
    pub fn count(&self, state: CellState) -> usize {
        match state {
            CellState::Empty => self.empty,
            CellState::Tree => self.tree,
            CellState::Burning => self.burning,
        }
    }
}

/// Cell grid with fixed dimensions
///
/// Deserialization is checked: a decoded grid upholds the same `rows × cols`
/// invariant as one built with [`Grid::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Cells in row-major order: `[row * cols + col]`
    cells: Vec<CellState>,
}

/// Unchecked serialized form of a [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.rows == 0 || raw.cols == 0 {
            return Err(GridError::Empty);
        }
        if raw.rows.checked_mul(raw.cols) != Some(raw.cells.len()) {
            return Err(GridError::CellCount {
                rows: raw.rows,
                cols: raw.cols,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create a grid with every cell set to `state`
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero
    pub fn filled(rows: usize, cols: usize, state: CellState) -> Self {
        assert!(rows > 0 && cols > 0, "Grid dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![state; rows * cols],
        }
    }

    /// Create a square `size × size` grid of empty cells
    pub fn empty(size: usize) -> Self {
        Self::filled(size, size, CellState::Empty)
    }

    /// Build a grid from explicit rows
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] for no rows or zero-length rows and
    /// [`GridError::Ragged`] if rows differ in length.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// Parse the text form produced by `Display`
    ///
    /// One grid row per non-blank line. Whitespace inside a line is ignored, so
    /// both `T.*` and `1 0 2` are accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] for unknown glyphs, ragged rows or empty input.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let row_idx = rows.len();
            let row = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .enumerate()
                .map(|(col, glyph)| {
                    CellState::from_glyph(glyph).ok_or(GridError::UnknownGlyph {
                        row: row_idx,
                        col,
                        glyph,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows × cols`)
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `(row, col)` lies inside the grid
    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Row-major cell slice
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> &[CellState] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(self.in_bounds(row, col), "Coordinates out of bounds");
        row * self.cols + col
    }

    /// Get the state at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.cells[self.index(row, col)]
    }

    /// Set the state at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        let idx = self.index(row, col);
        self.cells[idx] = state;
    }

    /// States of the in-bounds Moore neighbors of `(row, col)`
    ///
    /// Yields 3 values at a corner, 5 along an edge and 8 in the interior.
    /// Iteration order is not part of the contract.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` itself is out of bounds
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = CellState> + '_ {
        assert!(self.in_bounds(row, col), "Coordinates out of bounds");
        MOORE_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.in_bounds(r, c).then(|| self.cells[r * self.cols + c])
        })
    }

    /// Whether any Moore neighbor of `(row, col)` is burning
    #[inline]
    pub fn has_burning_neighbor(&self, row: usize, col: usize) -> bool {
        self.neighbors(row, col).any(CellState::is_burning)
    }

    /// Iterate `((row, col), state)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CellState)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &state)| ((idx / cols, idx % cols), state))
    }

    /// Number of cells in `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Whether any cell is in `state`
    pub fn contains(&self, state: CellState) -> bool {
        self.cells.contains(&state)
    }

    /// Counts of every state in one pass
    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats::default();
        for &state in &self.cells {
            match state {
                CellState::Empty => stats.empty += 1,
                CellState::Tree => stats.tree += 1,
                CellState::Burning => stats.burning += 1,
            }
        }
        stats
    }

    /// Assemble a grid from an already-computed row-major buffer
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for state in self.row(row) {
                write!(f, "{}", state.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
