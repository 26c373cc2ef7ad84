mod renderer;
mod settings;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use forest_fire_core::{presets, ForestFireSimulation, SimulationConfig, StopReason};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use renderer::TerminalRenderer;
use settings::{Args, DemoSettings};
use std::io;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = args.resolve()?;

    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
    info!("Using seed {} (pass --seed {} to replay)", seed, seed);

    let mut sim = build_simulation(&settings, seed)?;
    let mut renderer = TerminalRenderer::new(io::stdout().lock(), settings.render.clone());
    let summary = sim.run(&mut renderer);

    if summary.stop_reason == StopReason::SinkRequested {
        return Err(anyhow!(
            "output closed after {} generations",
            summary.generations
        ));
    }
    Ok(())
}

/// Build the simulation from a preset grid or a freshly generated forest
fn build_simulation(settings: &DemoSettings, seed: u64) -> Result<ForestFireSimulation> {
    let rng = StdRng::seed_from_u64(seed);
    match &settings.preset {
        Some(name) => {
            let grid = presets::by_name(name)
                .ok_or_else(|| anyhow!("unknown preset {name:?} (available: sample)"))?;
            // The preset fixes the grid size
            let config = SimulationConfig {
                size: grid.rows(),
                ..settings.simulation.clone()
            };
            ForestFireSimulation::from_grid(config, grid, rng)
                .with_context(|| format!("starting from preset {name:?}"))
        }
        None => ForestFireSimulation::new(settings.simulation.clone(), rng)
            .context("invalid simulation settings"),
    }
}
