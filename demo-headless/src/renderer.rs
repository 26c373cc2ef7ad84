//! Terminal renderer
//!
//! Draws each generation to a writer (stdout in the binary) and prints
//! periodic report lines. Rendering is entirely the sink's business; the
//! simulation only hands it frames.

use crate::settings::{RenderMode, RenderSettings};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{Clear, ClearType};
use forest_fire_core::{CellState, Frame, FrameSink, Grid, GridStats, RunSummary};
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Background color per state: black ground, green trees, red fire
fn cell_color(state: CellState) -> Color {
    match state {
        CellState::Empty => Color::Black,
        CellState::Tree => Color::Green,
        CellState::Burning => Color::Red,
    }
}

/// [`FrameSink`] that draws frames to a terminal
pub struct TerminalRenderer<W: Write> {
    out: W,
    settings: RenderSettings,
    /// Set when a write fails; the run is stopped on the next frame
    failed: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, settings: RenderSettings) -> Self {
        Self {
            out,
            settings,
            failed: false,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, generation: u32, grid: &Grid, stats: GridStats) -> io::Result<()> {
        match self.settings.mode {
            RenderMode::Ansi => {
                queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
                for row in 0..grid.rows() {
                    for &state in grid.row(row) {
                        // Two columns per cell keeps the grid roughly square
                        queue!(self.out, SetBackgroundColor(cell_color(state)), Print("  "))?;
                    }
                    queue!(self.out, ResetColor, Print("\n"))?;
                }
                Self::write_status(&mut self.out, generation, stats)?;
            }
            RenderMode::Ascii => {
                write!(self.out, "{grid}")?;
                Self::write_status(&mut self.out, generation, stats)?;
                writeln!(self.out)?;
            }
            RenderMode::None => {}
        }
        self.out.flush()
    }

    fn write_status(out: &mut W, generation: u32, stats: GridStats) -> io::Result<()> {
        writeln!(
            out,
            "generation {generation}: {} trees, {} burning, {} empty",
            stats.tree, stats.burning, stats.empty
        )
    }

    /// Table row for `RenderMode::None`. Drawing modes already print the
    /// counts under every frame, so the interval only applies there.
    fn report(&mut self, generation: u32, stats: GridStats) -> io::Result<()> {
        let interval = self.settings.report_interval;
        if self.settings.mode != RenderMode::None || interval == 0 || generation % interval != 0 {
            return Ok(());
        }
        writeln!(
            self.out,
            "{:10} | {:7} | {:7} | {:7}",
            generation, stats.tree, stats.burning, stats.empty
        )
    }

    fn check(&mut self, result: io::Result<()>) -> ControlFlow<()> {
        match result {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => {
                warn!("Terminal write failed, stopping run: {}", err);
                self.failed = true;
                ControlFlow::Break(())
            }
        }
    }
}

impl<W: Write> FrameSink for TerminalRenderer<W> {
    fn begin(&mut self, initial: &Grid) {
        let stats = initial.stats();
        let mut result = self.draw(0, initial, stats);
        if result.is_ok() && self.settings.mode == RenderMode::None {
            result = writeln!(self.out, "Generation |   Trees | Burning |   Empty")
                .and_then(|()| writeln!(self.out, "-----------|---------|---------|--------"))
                .and_then(|()| self.report(0, stats));
        }
        let _ = self.check(result);
    }

    fn on_frame(&mut self, frame: &Frame<'_>) -> ControlFlow<()> {
        if self.failed {
            return ControlFlow::Break(());
        }
        let result = self
            .draw(frame.generation, frame.grid, frame.stats)
            .and_then(|()| self.report(frame.generation, frame.stats));
        if self.check(result).is_break() {
            return ControlFlow::Break(());
        }

        if self.settings.delay_ms > 0 {
            thread::sleep(Duration::from_millis(self.settings.delay_ms));
        }
        ControlFlow::Continue(())
    }

    fn finish(&mut self, summary: &RunSummary) {
        let stats = summary.final_stats;
        let result = writeln!(self.out)
            .and_then(|()| writeln!(self.out, "=== Simulation Complete ==="))
            .and_then(|()| writeln!(self.out, "Stopped: {:?}", summary.stop_reason))
            .and_then(|()| {
                writeln!(
                    self.out,
                    "Generations: {} (final generation {})",
                    summary.generations, summary.final_generation
                )
            })
            .and_then(|()| {
                writeln!(
                    self.out,
                    "Final grid: {} trees, {} burning, {} empty",
                    stats.tree, stats.burning, stats.empty
                )
            })
            .and_then(|()| writeln!(self.out, "Mean step time: {:.3} ms", summary.mean_tick_ms))
            .and_then(|()| self.out.flush());
        let _ = self.check(result);
    }
}
