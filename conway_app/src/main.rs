// main.rs - Desktop front end for the toroidal Game of Life engine

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use conway::{SimulationConfig, SimulationController};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod ui;

use ui::{CELL_PX_RANGE, LifeApp};

#[derive(Debug, Parser)]
#[command(name = "conway", about = "Conway's Game of Life on a wrapping grid")]
struct Args {
    /// JSON file with `size`, `tick_interval_ms` and `random_density`.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Cells per side.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=500))]
    size: Option<u32>,

    /// Milliseconds between generations while running.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=60_000))]
    interval_ms: Option<u64>,

    /// Alive probability for the random seed.
    #[arg(long)]
    density: Option<f64>,

    /// Pattern placed on the board at startup (`glider`, `random`, ...).
    #[arg(long)]
    seed: Option<String>,

    /// Side of one painted cell, in points.
    #[arg(long, default_value_t = 20.0)]
    cell_px: f32,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(size) = self.size {
            config.size = size as usize;
        }
        if let Some(ms) = self.interval_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(density) = self.density {
            config.random_density = density;
        }
        if let Some(seed) = &self.seed {
            config.initial_seed = Some(seed.clone());
        }
        config.validate()?;
        Ok(config)
    }

    fn cell_px(&self) -> f32 {
        self.cell_px.clamp(*CELL_PX_RANGE.start(), *CELL_PX_RANGE.end())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.simulation_config()?;
    info!(?config, "starting");

    // The ticker lives on this runtime; the UI thread only calls into the controller.
    let runtime = tokio::runtime::Runtime::new().context("building tokio runtime")?;
    let controller = SimulationController::new(config, runtime.handle().clone())?;
    let cell_px = args.cell_px();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(LifeApp::new(cc, controller, runtime, cell_px))),
    )
    .map_err(|e| anyhow!("ui exited with error: {e}"))
}
