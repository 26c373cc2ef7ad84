//! Forest Fire Simulation Core Library
//!
//! A cellular-automaton model of fire moving through a forest. Every cell of a
//! square grid is empty ground, a tree, or a burning tree. Each generation:
//! - burning cells burn out and become empty ground
//! - trees next to a burning cell catch fire
//! - any tree may also ignite on its own with a small probability
//!
//! ## Synchronous updates
//!
//! A generation is always computed into a fresh [`Grid`] that reads only from
//! the previous one, so fire advances exactly one cell per generation in every
//! direction. The per-cell rule can run sequentially or on rayon workers
//! ([`UpdateStrategy`]) with identical semantics.
//!
//! ## Example
//!
//! ```rust
//! use forest_fire_core::{ForestFireSimulation, FrameRecorder, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     size: 20,
//!     max_generations: 30,
//!     ..SimulationConfig::default()
//! };
//! let mut sim = ForestFireSimulation::seeded(config, 7).expect("valid config");
//! let mut recorder = FrameRecorder::new();
//! let summary = sim.run(&mut recorder);
//! assert_eq!(recorder.frames().len(), summary.generations as usize);
//! ```

// Core types and utilities
pub mod core_types;

pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod simulation;
pub mod solver;

// Re-export core types
pub use core_types::CellState;

pub use config::{SimulationConfig, UpdateStrategy};
pub use error::{ConfigError, GridError};
pub use grid::{presets, Grid, GridStats};
pub use rng::RandomSource;
pub use simulation::{
    ChannelSink, ForestFireSimulation, Frame, FrameRecorder, FrameSink, NullSink, RunSummary,
    StopReason,
};
pub use solver::{initialize, is_terminal, step, step_parallel, step_with};
