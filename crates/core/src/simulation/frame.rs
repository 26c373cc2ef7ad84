//! Frame sink interface and built-in sinks
//!
//! The driver hands every new generation to a [`FrameSink`] in generation
//! order. Sinks own all presentation and recording decisions, including
//! whether the run should continue.

use crate::grid::{Grid, GridStats};
use std::ops::ControlFlow;
use std::sync::mpsc::Sender;

use super::RunSummary;

/// One fully computed generation, borrowed from the driver
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Generation number, starting at 1 for the first step
    pub generation: u32,
    /// Grid for this generation
    pub grid: &'a Grid,
    /// Cell counts for `grid`
    pub stats: GridStats,
}

/// Consumer of simulation frames
pub trait FrameSink {
    /// Called once with the starting grid before the first step
    fn begin(&mut self, _initial: &Grid) {}

    /// Called once per generation. Returning `Break` stops the run.
    fn on_frame(&mut self, frame: &Frame<'_>) -> ControlFlow<()>;

    /// Called once after the run stops
    fn finish(&mut self, _summary: &RunSummary) {}
}

impl<F> FrameSink for F
where
    F: FnMut(&Frame<'_>) -> ControlFlow<()>,
{
    fn on_frame(&mut self, frame: &Frame<'_>) -> ControlFlow<()> {
        self(frame)
    }
}

/// Sink that discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn on_frame(&mut self, _frame: &Frame<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Sink that keeps an owned copy of every grid it sees
///
/// The driver itself keeps no history; use this when a replay or analysis
/// needs past generations.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    initial: Option<Grid>,
    frames: Vec<Grid>,
    stats: Vec<GridStats>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting grid, if a run has begun
    pub fn initial(&self) -> Option<&Grid> {
        self.initial.as_ref()
    }

    /// Recorded generations in order (generation 1 first)
    pub fn frames(&self) -> &[Grid] {
        &self.frames
    }

    /// Per-generation cell counts, parallel to [`frames`](Self::frames)
    pub fn stats(&self) -> &[GridStats] {
        &self.stats
    }

    /// Take ownership of the recorded generations
    pub fn into_frames(self) -> Vec<Grid> {
        self.frames
    }
}

impl FrameSink for FrameRecorder {
    fn begin(&mut self, initial: &Grid) {
        self.initial = Some(initial.clone());
    }

    fn on_frame(&mut self, frame: &Frame<'_>) -> ControlFlow<()> {
        self.frames.push(frame.grid.clone());
        self.stats.push(frame.stats);
        ControlFlow::Continue(())
    }
}

/// Sink that forwards a copy of each grid over a channel
///
/// Stops the run once the receiving side has hung up.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<Grid>,
}

impl ChannelSink {
    pub fn new(sender: Sender<Grid>) -> Self {
        Self { sender }
    }
}

impl FrameSink for ChannelSink {
    fn on_frame(&mut self, frame: &Frame<'_>) -> ControlFlow<()> {
        match self.sender.send(frame.grid.clone()) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::CellState;
    use std::sync::mpsc;

    fn frame(grid: &Grid, generation: u32) -> Frame<'_> {
        Frame {
            generation,
            grid,
            stats: grid.stats(),
        }
    }

    #[test]
    fn test_recorder_keeps_frames() {
        let grid = Grid::filled(2, 2, CellState::Tree);
        let mut recorder = FrameRecorder::new();
        recorder.begin(&grid);
        assert!(recorder.on_frame(&frame(&grid, 1)).is_continue());
        assert!(recorder.on_frame(&frame(&grid, 2)).is_continue());
        assert_eq!(recorder.frames().len(), 2);
        assert_eq!(recorder.stats()[0].tree, 4);
        assert_eq!(recorder.initial(), Some(&grid));
    }

    #[test]
    fn test_closure_sink() {
        let grid = Grid::empty(2);
        let mut seen = Vec::new();
        let mut sink = |f: &Frame<'_>| {
            seen.push(f.generation);
            if f.generation >= 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        assert!(sink.on_frame(&frame(&grid, 1)).is_continue());
        assert!(sink.on_frame(&frame(&grid, 2)).is_break());
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_channel_sink_stops_when_receiver_dropped() {
        let grid = Grid::empty(3);
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx);
        assert!(sink.on_frame(&frame(&grid, 1)).is_continue());
        assert_eq!(rx.recv().ok(), Some(grid.clone()));
        drop(rx);
        assert!(sink.on_frame(&frame(&grid, 2)).is_break());
    }
}
