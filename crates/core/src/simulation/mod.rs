//! Simulation driver
//!
//! `ForestFireSimulation` owns the current grid, the config and the random
//! source. Each generation replaces the grid with a freshly computed one and
//! hands it to a [`FrameSink`]; no history is kept here.
//!
//! The run loop stops at the first of:
//! - a steady state (nothing burning, and no tree that could still ignite)
//! - `max_generations` generations
//! - the sink returning `ControlFlow::Break`

pub mod frame;

// Re-export public types from frame
pub use frame::{ChannelSink, Frame, FrameRecorder, FrameSink, NullSink};

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::grid::{Grid, GridStats};
use crate::rng::RandomSource;
use crate::solver::{initialize, is_terminal, step_with, ProfilerScope, TickTimer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Further generations cannot change the grid
    SteadyState,
    /// `max_generations` reached
    GenerationLimit,
    /// The frame sink asked to stop
    SinkRequested,
}

/// Outcome of [`ForestFireSimulation::run`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Generations stepped during this run call
    pub generations: u32,
    /// Generation number of the final grid
    pub final_generation: u32,
    pub stop_reason: StopReason,
    /// Cell counts of the final grid
    pub final_stats: GridStats,
    /// Mean wall-clock time per generation (ms)
    pub mean_tick_ms: f64,
}

/// Forest-fire simulation with an explicit random source
pub struct ForestFireSimulation<R = StdRng> {
    config: SimulationConfig,
    /// Current generation. Replaced, never mutated, by each tick.
    grid: Grid,
    rng: R,
    generation: u32,
    timer: TickTimer,
}

impl ForestFireSimulation<StdRng> {
    /// Create a reproducible simulation from a `u64` seed
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` is invalid.
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        info!("Seeding simulation rng with {}", seed);
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> ForestFireSimulation<R> {
    /// Create a simulation and generate its starting forest
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` is invalid.
    pub fn new(config: SimulationConfig, mut rng: R) -> Result<Self, ConfigError> {
        let grid = initialize(&config, &mut rng)?;
        Ok(Self::assemble(config, grid, rng))
    }

    /// Create a simulation that starts from a supplied grid
    ///
    /// The grid is used as-is; `ignition_seeds` and `tree_density` are not
    /// applied to it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` is invalid or the grid is not
    /// `size × size`.
    pub fn from_grid(config: SimulationConfig, grid: Grid, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.rows() != config.size || grid.cols() != config.size {
            return Err(ConfigError::GridSizeMismatch {
                rows: grid.rows(),
                cols: grid.cols(),
                size: config.size,
            });
        }
        info!(
            "Starting simulation from supplied {}x{} grid",
            grid.rows(),
            grid.cols()
        );
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: SimulationConfig, grid: Grid, rng: R) -> Self {
        Self {
            config,
            grid,
            rng,
            generation: 0,
            timer: TickTimer::new(),
        }
    }

    /// Advance one generation and return the new grid
    pub fn tick(&mut self) -> &Grid {
        let scope = ProfilerScope::start();
        let next = step_with(
            self.config.update_strategy,
            &self.grid,
            &self.config,
            &mut self.rng,
        );
        debug_assert_eq!((next.rows(), next.cols()), (self.grid.rows(), self.grid.cols()));
        self.grid = next;
        self.generation += 1;
        let elapsed_ms = self.timer.finish(&scope);

        if tracing::enabled!(tracing::Level::DEBUG) {
            let stats = self.grid.stats();
            debug!(
                "Generation {}: {} burning, {} trees, {} empty ({:.3} ms)",
                self.generation, stats.burning, stats.tree, stats.empty, elapsed_ms
            );
        }

        &self.grid
    }

    /// Run until a steady state, the generation cap, or the sink stops it
    ///
    /// The sink's `begin` sees the current grid first, then `on_frame` sees
    /// every new generation in order. A run that starts in a steady state or
    /// at the cap steps nothing.
    pub fn run<K: FrameSink + ?Sized>(&mut self, sink: &mut K) -> RunSummary {
        let start_generation = self.generation;
        sink.begin(&self.grid);

        let stop_reason = loop {
            if self.is_terminal() {
                break StopReason::SteadyState;
            }
            if self.generation >= self.config.max_generations {
                break StopReason::GenerationLimit;
            }

            self.tick();
            let frame = Frame {
                generation: self.generation,
                grid: &self.grid,
                stats: self.grid.stats(),
            };
            if sink.on_frame(&frame).is_break() {
                break StopReason::SinkRequested;
            }
        };

        let summary = RunSummary {
            generations: self.generation - start_generation,
            final_generation: self.generation,
            stop_reason,
            final_stats: self.grid.stats(),
            mean_tick_ms: self.timer.mean_tick_ms(),
        };

        info!(
            "Run stopped after {} generations ({:?}): {} trees, {} empty, {} burning",
            summary.generations,
            summary.stop_reason,
            summary.final_stats.tree,
            summary.final_stats.empty,
            summary.final_stats.burning
        );

        sink.finish(&summary);
        summary
    }

    /// Whether the current grid is a steady state
    pub fn is_terminal(&self) -> bool {
        is_terminal(&self.grid, &self.config)
    }

    /// Current grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Take the current grid, ending the simulation
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of generations stepped so far
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Cell counts of the current grid
    pub fn stats(&self) -> GridStats {
        self.grid.stats()
    }

    /// Per-generation timing
    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }
}
