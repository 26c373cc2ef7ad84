//! Generation solver: initialization, the transition rule and steady-state
//! detection
//!
//! Everything here is a free function over explicit inputs. There is no
//! process-wide state; the grid, config and random source are always passed in.
//!
//! # Update strategies
//!
//! [`step`] runs on the calling thread. [`step_parallel`] computes rows on
//! rayon workers. [`step_with`] picks one from an [`UpdateStrategy`].

mod init;
pub mod profiler;
mod step;
mod termination;

// Re-exports
pub use init::initialize;
pub use profiler::{ProfilerScope, TickTimer};
pub use step::{step, step_parallel};
pub use termination::is_terminal;

use crate::config::{SimulationConfig, UpdateStrategy};
use crate::grid::Grid;
use crate::rng::RandomSource;

/// Advance one generation with the given strategy
pub fn step_with<S: RandomSource + ?Sized>(
    strategy: UpdateStrategy,
    grid: &Grid,
    config: &SimulationConfig,
    rng: &mut S,
) -> Grid {
    match strategy {
        UpdateStrategy::Sequential => step(grid, config, rng),
        UpdateStrategy::Parallel => step_parallel(grid, config, rng),
    }
}
