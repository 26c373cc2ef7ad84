//! Integration tests for the simulation driver and frame sinks

use forest_fire_core::simulation::ChannelSink;
use forest_fire_core::{
    presets, CellState, ForestFireSimulation, Frame, FrameRecorder, FrameSink, Grid, RunSummary,
    SimulationConfig, StopReason, UpdateStrategy,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::ControlFlow;
use std::sync::mpsc;
use std::thread;

/// Sink that checks frame ordering and counts callbacks
#[derive(Default)]
struct OrderCheckingSink {
    began: bool,
    last_generation: u32,
    finished_with: Option<RunSummary>,
}

impl FrameSink for OrderCheckingSink {
    fn begin(&mut self, initial: &Grid) {
        assert!(!self.began, "begin called twice");
        assert!(initial.contains(CellState::Burning));
        self.began = true;
    }

    fn on_frame(&mut self, frame: &Frame<'_>) -> ControlFlow<()> {
        assert!(self.began, "frame before begin");
        assert_eq!(frame.generation, self.last_generation + 1);
        assert_eq!(frame.stats, frame.grid.stats());
        self.last_generation = frame.generation;
        ControlFlow::Continue(())
    }

    fn finish(&mut self, summary: &RunSummary) {
        self.finished_with = Some(*summary);
    }
}

#[test]
fn test_sample_forest_burns_out() {
    let config = SimulationConfig {
        size: 5,
        spontaneous_ignition_probability: 0.0,
        ..SimulationConfig::default()
    };
    let mut sim = ForestFireSimulation::from_grid(
        config,
        presets::sample_forest(),
        StdRng::seed_from_u64(1),
    )
    .expect("preset matches config size");

    let mut recorder = FrameRecorder::new();
    let summary = sim.run(&mut recorder);

    assert_eq!(summary.stop_reason, StopReason::SteadyState);
    assert_eq!(summary.final_stats.burning, 0);
    // Every tree in the sample forest is connected to the initial fires
    assert_eq!(summary.final_stats.tree, 0);

    // Generation 1: the four fires burn out, every remaining tree touches one
    let first = &recorder.frames()[0];
    assert_eq!(first.count(CellState::Burning), 17);
    assert_eq!(summary.generations, 2);
}

#[test]
fn test_sink_callbacks_in_order() {
    let config = SimulationConfig {
        size: 25,
        tree_density: 0.65,
        spontaneous_ignition_probability: 0.002,
        max_generations: 40,
        ..SimulationConfig::default()
    };
    let mut sim = ForestFireSimulation::seeded(config, 2024).expect("valid config");
    let mut sink = OrderCheckingSink::default();
    let summary = sim.run(&mut sink);

    assert_eq!(sink.last_generation, summary.generations);
    assert_eq!(sink.finished_with, Some(summary));
    assert!(summary.generations <= 40);
}

#[test]
fn test_dyn_sink() {
    let config = SimulationConfig {
        size: 9,
        tree_density: 1.0,
        spontaneous_ignition_probability: 0.0,
        ..SimulationConfig::default()
    };
    let mut sim = ForestFireSimulation::seeded(config, 3).expect("valid config");
    let mut recorder = FrameRecorder::new();
    let sink: &mut dyn FrameSink = &mut recorder;
    let summary = sim.run(sink);
    assert_eq!(summary.generations, 5);
    assert_eq!(recorder.frames().len(), 5);
}

#[test]
fn test_channel_sink_feeds_renderer_thread() {
    let config = SimulationConfig {
        size: 15,
        tree_density: 1.0,
        spontaneous_ignition_probability: 0.0,
        max_generations: 50,
        update_strategy: UpdateStrategy::Parallel,
        ..SimulationConfig::default()
    };
    let (tx, rx) = mpsc::channel::<Grid>();

    let renderer = thread::spawn(move || {
        rx.iter()
            .map(|grid| grid.count(CellState::Burning))
            .collect::<Vec<_>>()
    });

    let mut sim = ForestFireSimulation::seeded(config, 4).expect("valid config");
    let mut sink = ChannelSink::new(tx);
    let summary = sim.run(&mut sink);
    drop(sink);

    let burning = renderer.join().expect("renderer thread");
    assert_eq!(burning.len(), summary.generations as usize);
    // Rings around the center: 8, 16, 24, ... then burned out
    assert_eq!(&burning[..3], &[8, 16, 24]);
    assert_eq!(burning.last(), Some(&0));
}

#[test]
fn test_run_after_steady_state_is_noop() {
    let config = SimulationConfig {
        size: 7,
        tree_density: 0.0,
        spontaneous_ignition_probability: 0.0,
        ..SimulationConfig::default()
    };
    let mut sim = ForestFireSimulation::seeded(config, 5).expect("valid config");
    let first = sim.run(&mut FrameRecorder::new());
    assert_eq!(first.stop_reason, StopReason::SteadyState);
    assert_eq!(first.generations, 1);

    let second = sim.run(&mut FrameRecorder::new());
    assert_eq!(second.generations, 0);
    assert_eq!(second.stop_reason, StopReason::SteadyState);
    assert_eq!(sim.grid(), &Grid::empty(7));
}
