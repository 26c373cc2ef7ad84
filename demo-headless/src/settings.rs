//! Demo settings: TOML file first, then command-line overrides

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use forest_fire_core::{SimulationConfig, UpdateStrategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How frames are drawn to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Colored blocks: black ground, green trees, red fire
    #[default]
    Ansi,
    /// Plain glyph rows (`.`, `T`, `*`)
    Ascii,
    /// Report lines only
    None,
}

/// Presentation options for the terminal renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub mode: RenderMode,
    /// Pause after each frame (ms)
    pub delay_ms: u64,
    /// With `RenderMode::None`, print a table row every N generations
    /// (0 = final summary only). Drawing modes show counts under every frame.
    pub report_interval: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Ansi,
            delay_ms: 100,
            report_interval: 10,
        }
    }
}

/// Everything the demo reads from its config file
///
/// ```toml
/// seed = 42
///
/// [simulation]
/// size = 80
/// tree_density = 0.55
/// ignition_seeds = [[10, 10], [70, 70]]
///
/// [render]
/// mode = "ascii"
/// delay_ms = 0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub simulation: SimulationConfig,
    pub render: RenderSettings,
    /// Fixed rng seed; a random one is drawn and logged when absent
    pub seed: Option<u64>,
    /// Start from a named preset grid instead of a random forest
    pub preset: Option<String>,
}

impl DemoSettings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or mistyped values.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid settings TOML")
    }

    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Forest-fire cellular automaton in the terminal
#[derive(Parser, Debug)]
#[command(name = "forest-fire")]
#[command(about = "Forest-fire cellular automaton demo", long_about = None)]
pub struct Args {
    /// TOML settings file; command-line options override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid side length in cells
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Probability that a cell starts as a tree (0-1)
    #[arg(short = 'd', long)]
    pub density: Option<f64>,

    /// Per-generation probability that a tree ignites on its own
    #[arg(short = 'p', long)]
    pub ignition_prob: Option<f64>,

    /// Maximum number of generations
    #[arg(short = 'g', long)]
    pub generations: Option<u32>,

    /// Rng seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial fire at ROW,COL (repeatable; default is the grid center)
    #[arg(short, long = "ignite", value_name = "ROW,COL", value_parser = parse_cell)]
    pub ignite: Vec<(usize, usize)>,

    /// Start from a preset grid (sample)
    #[arg(long)]
    pub preset: Option<String>,

    /// Step rows on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Frame renderer
    #[arg(short, long, value_enum)]
    pub renderer: Option<RenderMode>,

    /// Pause after each frame in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Print a table row every N generations with `--renderer none`
    /// (the drawing renderers show counts under every frame)
    #[arg(long)]
    pub report_interval: Option<u32>,
}

impl Args {
    /// Load the config file (if any) and apply command-line overrides
    ///
    /// # Errors
    ///
    /// Fails if `--config` names an unreadable or invalid file.
    pub fn resolve(&self) -> Result<DemoSettings> {
        let mut settings = match &self.config {
            Some(path) => DemoSettings::load(path)?,
            None => DemoSettings::default(),
        };
        self.apply(&mut settings);
        Ok(settings)
    }

    fn apply(&self, settings: &mut DemoSettings) {
        let sim = &mut settings.simulation;
        if let Some(size) = self.size {
            sim.size = size;
        }
        if let Some(density) = self.density {
            sim.tree_density = density;
        }
        if let Some(p) = self.ignition_prob {
            sim.spontaneous_ignition_probability = p;
        }
        if let Some(generations) = self.generations {
            sim.max_generations = generations;
        }
        if !self.ignite.is_empty() {
            sim.ignition_seeds.clone_from(&self.ignite);
        }
        if self.parallel {
            sim.update_strategy = UpdateStrategy::Parallel;
        }

        let render = &mut settings.render;
        if let Some(mode) = self.renderer {
            render.mode = mode;
        }
        if let Some(delay_ms) = self.delay_ms {
            render.delay_ms = delay_ms;
        }
        if let Some(interval) = self.report_interval {
            render.report_interval = interval;
        }

        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.preset.is_some() {
            settings.preset.clone_from(&self.preset);
        }
    }
}

/// Parse a `ROW,COL` pair
fn parse_cell(s: &str) -> Result<(usize, usize)> {
    let Some((row, col)) = s.split_once(',') else {
        bail!("expected ROW,COL, got {s:?}");
    };
    let row = row
        .trim()
        .parse()
        .with_context(|| format!("invalid row in {s:?}"))?;
    let col = col
        .trim()
        .parse()
        .with_context(|| format!("invalid column in {s:?}"))?;
    Ok((row, col))
}
