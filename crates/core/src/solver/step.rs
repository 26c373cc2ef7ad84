//! Generation update: the forest-fire transition rule
//!
//! Both entry points double-buffer. The next generation is written into a fresh
//! buffer while every neighbor read goes to the frozen previous grid, so a cell
//! that ignites this generation cannot ignite its own neighbors until the next
//! one. Updating in place would let fire cross the whole grid diagonally in a
//! single pass.
//!
//! Transition table:
//!
//! | before    | after                                                    |
//! |-----------|----------------------------------------------------------|
//! | `Empty`   | `Empty`                                                  |
//! | `Burning` | `Empty`                                                  |
//! | `Tree`    | `Burning` if a neighbor burns or spontaneous draw hits, else `Tree` |

use crate::config::SimulationConfig;
use crate::core_types::CellState;
use crate::grid::Grid;
use crate::rng::RandomSource;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// 2^53: uniform draws carry 53 bits, used to turn one draw into a tick seed
const SEED_SCALE: f64 = 9_007_199_254_740_992.0;

/// Golden-ratio increment used to spread row indices across the seed space
const ROW_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Next state of one cell
///
/// Draws exactly once from `rng` for a tree, never for other states. The
/// spontaneous draw is taken even when a neighbor already burns so the number
/// of draws per generation depends only on the tree count.
#[inline]
fn next_state<S: RandomSource + ?Sized>(
    grid: &Grid,
    row: usize,
    col: usize,
    state: CellState,
    ignition_probability: f64,
    rng: &mut S,
) -> CellState {
    match state {
        CellState::Empty | CellState::Burning => CellState::Empty,
        CellState::Tree => {
            let spontaneous = rng.bernoulli(ignition_probability);
            if spontaneous || grid.has_burning_neighbor(row, col) {
                CellState::Burning
            } else {
                CellState::Tree
            }
        }
    }
}

/// Compute one output row from the previous grid
#[inline]
fn step_row<S: RandomSource + ?Sized>(
    prev: &Grid,
    row: usize,
    out: &mut [CellState],
    ignition_probability: f64,
    rng: &mut S,
) {
    for (col, (cell, &state)) in out.iter_mut().zip(prev.row(row)).enumerate() {
        *cell = next_state(prev, row, col, state, ignition_probability, rng);
    }
}

/// Advance the grid by one generation on the calling thread
///
/// # Arguments
///
/// * `grid` - Previous generation (read-only)
/// * `config` - Supplies `spontaneous_ignition_probability`
/// * `rng` - Queried once per tree cell, in row-major order
///
/// # Returns
///
/// A new grid with the same dimensions as `grid`
pub fn step<S: RandomSource + ?Sized>(grid: &Grid, config: &SimulationConfig, rng: &mut S) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let p = config.spontaneous_ignition_probability;

    let mut next = vec![CellState::Empty; grid.len()];
    for (row, out) in next.chunks_mut(cols).enumerate() {
        step_row(grid, row, out, p, rng);
    }

    Grid::from_cells(rows, cols, next)
}

/// Advance the grid by one generation using rayon, one row per task
///
/// Draws a single tick seed from `rng`, then gives each row its own generator
/// seeded from `(tick_seed, row)`. Each row generator is queried once per tree
/// in that row. The result depends only on the inputs and the rng state, not
/// on how rows are scheduled across threads. With a zero ignition probability
/// the output is identical to [`step`].
///
/// # Arguments
///
/// * `grid` - Previous generation, shared read-only by all workers
/// * `config` - Supplies `spontaneous_ignition_probability`
/// * `rng` - Queried exactly once per call
///
/// # Returns
///
/// A new grid with the same dimensions as `grid`
pub fn step_parallel<S: RandomSource + ?Sized>(
    grid: &Grid,
    config: &SimulationConfig,
    rng: &mut S,
) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let p = config.spontaneous_ignition_probability;
    let tick_seed = (rng.uniform() * SEED_SCALE) as u64;

    // Each output row is written by exactly one worker
    let mut next = vec![CellState::Empty; grid.len()];
    next.par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, out)| {
            let mut row_rng = StdRng::seed_from_u64(row_seed(tick_seed, row));
            step_row(grid, row, out, p, &mut row_rng);
        });

    Grid::from_cells(rows, cols, next)
}

#[inline]
fn row_seed(tick_seed: u64, row: usize) -> u64 {
    tick_seed ^ (row as u64 + 1).wrapping_mul(ROW_SEED_STRIDE)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Random source that counts draws and always returns the same value
    struct CountingSource {
        value: f64,
        draws: usize,
    }

    impl RandomSource for CountingSource {
        fn uniform(&mut self) -> f64 {
            self.draws += 1;
            self.value
        }
    }

    fn no_ignition() -> SimulationConfig {
        SimulationConfig {
            size: 5,
            spontaneous_ignition_probability: 0.0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_synchronous_propagation() {
        let mut grid = Grid::filled(5, 5, CellState::Tree);
        grid.set(2, 2, CellState::Burning);
        let mut rng = StdRng::seed_from_u64(1);

        let next = step(&grid, &no_ignition(), &mut rng);

        assert_eq!(next.get(2, 2), CellState::Empty);
        for row in 0..5usize {
            for col in 0..5usize {
                if (row, col) == (2, 2) {
                    continue;
                }
                let is_neighbor = row.abs_diff(2) <= 1 && col.abs_diff(2) <= 1;
                let expected = if is_neighbor {
                    CellState::Burning
                } else {
                    CellState::Tree
                };
                assert_eq!(next.get(row, col), expected, "cell ({row}, {col})");
            }
        }
        assert_eq!(next.count(CellState::Burning), 8);
    }

    #[test]
    fn test_fire_spreads_one_cell_per_generation() {
        // A single burning corner on a line of trees only reaches the next cell
        let mut grid = Grid::filled(1, 6, CellState::Tree);
        grid.set(0, 0, CellState::Burning);
        let config = no_ignition();
        let mut rng = StdRng::seed_from_u64(2);

        let next = step(&grid, &config, &mut rng);
        assert_eq!(next.to_string(), ".*TTTT\n");
        let next = step(&next, &config, &mut rng);
        assert_eq!(next.to_string(), "..*TTT\n");
    }

    #[test]
    fn test_burning_becomes_empty_and_empty_stays_empty() {
        let grid = Grid::parse("*.\n.*").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let next = step(&grid, &no_ignition(), &mut rng);
        assert_eq!(next.count(CellState::Empty), 4);
    }

    #[test]
    fn test_one_draw_per_tree() {
        let grid = Grid::parse("TT*\n.T.\n*TT").unwrap();
        let mut source = CountingSource {
            value: 0.99,
            draws: 0,
        };
        let _ = step(&grid, &no_ignition(), &mut source);
        assert_eq!(source.draws, grid.count(CellState::Tree));
    }

    #[test]
    fn test_spontaneous_ignition_without_neighbors() {
        let grid = Grid::filled(3, 3, CellState::Tree);
        let config = SimulationConfig {
            spontaneous_ignition_probability: 0.5,
            ..no_ignition()
        };
        // Every draw below the threshold: every tree ignites
        let mut low = CountingSource {
            value: 0.1,
            draws: 0,
        };
        let next = step(&grid, &config, &mut low);
        assert_eq!(next.count(CellState::Burning), 9);

        // Every draw above the threshold: nothing happens
        let mut high = CountingSource {
            value: 0.9,
            draws: 0,
        };
        let next = step(&grid, &config, &mut high);
        assert_eq!(next, grid);
    }

    #[test]
    fn test_parallel_matches_sequential_without_ignition() {
        let grid = Grid::parse(
            "TTTTTTT\n\
             T.TT.TT\n\
             TT*TTT.\n\
             T.TTT.T\n\
             TTTT*TT\n\
             .TTTTTT\n",
        )
        .unwrap();
        let config = no_ignition();
        let mut a = StdRng::seed_from_u64(4);
        let mut b = StdRng::seed_from_u64(5);

        let mut seq = grid.clone();
        let mut par = grid;
        for _ in 0..6 {
            seq = step(&seq, &config, &mut a);
            par = step_parallel(&par, &config, &mut b);
            assert_eq!(seq, par);
        }
    }

    #[test]
    fn test_parallel_is_deterministic() {
        let grid = Grid::filled(40, 40, CellState::Tree);
        let config = SimulationConfig {
            spontaneous_ignition_probability: 0.05,
            ..no_ignition()
        };
        let a = step_parallel(&grid, &config, &mut StdRng::seed_from_u64(9));
        let b = step_parallel(&grid, &config, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert!(a.count(CellState::Burning) > 0);
    }

    #[test]
    fn test_parallel_draws_once_from_caller() {
        let grid = Grid::filled(8, 8, CellState::Tree);
        let mut source = CountingSource {
            value: 0.25,
            draws: 0,
        };
        let _ = step_parallel(&grid, &no_ignition(), &mut source);
        assert_eq!(source.draws, 1);
    }
}
