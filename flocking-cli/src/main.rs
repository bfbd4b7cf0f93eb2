use anyhow::{Context, Result};
use clap::Parser;
use flocking_cli::{parse_obstacle, parse_spawn, AppConfig, Runner};
use flocking_core::FlockConfig;
use flocking_shared::{ObstacleRequest, Preset, SpawnRequest};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boids flocking simulation", long_about = None)]
struct Args {
    /// Directory holding default.toml and user.toml, relative to the working directory
    #[arg(short, long, default_value = "config")]
    config: PathBuf,

    /// Parameter preset: walls, groups or classic
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Number of ticks to simulate
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Boids spawned at random positions before the first tick
    #[arg(short, long)]
    boids: Option<usize>,

    /// Extra boids as X,Y or X,Y,COUNT; may be repeated
    #[arg(short, long = "spawn", value_parser = parse_spawn)]
    spawns: Vec<SpawnRequest>,

    /// Static obstacles as X,Y or X,Y,SIZE; may be repeated
    #[arg(short, long = "obstacle", value_parser = parse_obstacle)]
    obstacles: Vec<ObstacleRequest>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON snapshot per status line to this file
    #[arg(long)]
    snapshots: Option<PathBuf>,

    /// Ticks between status lines
    #[arg(short, long)]
    every: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Flags beat every configuration source
    fn apply(&self, config: &mut AppConfig) {
        if let Some(preset) = self.preset {
            config.flock.preset = preset;
        }
        if let Some(ticks) = self.ticks {
            config.run.ticks = ticks;
        }
        if let Some(boids) = self.boids {
            config.run.boids = boids;
        }
        if let Some(seed) = self.seed {
            config.run.seed = Some(seed);
        }
        if let Some(every) = self.every {
            config.run.every = every;
        }
        if let Some(path) = &self.snapshots {
            config.run.snapshots = Some(path.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut app = AppConfig::load_from(&args.config).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            args.config.display()
        )
    })?;
    args.apply(&mut app);

    log::info!("Flocking simulation starting...");
    log::info!("Preset: {}", app.flock.preset);

    let config = FlockConfig::from_settings(&app.flock);
    let mut runner =
        Runner::new(config, &app.run, &args.spawns).context("Failed to set up simulation")?;
    runner.place_obstacles(&args.obstacles);

    if let Some(path) = &app.run.snapshots {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        log::info!("Writing snapshots to {}", path.display());
        runner = runner.with_snapshots(Box::new(BufWriter::new(file)));
    }

    let summary = runner.run(app.run.ticks).context("Simulation error")?;

    log::info!(
        "Done after {} ticks: {} boids alive, {} snapshots written (seed {})",
        summary.last_status.tick,
        summary.last_status.boid_count,
        summary.snapshots_written,
        summary.seed
    );

    Ok(())
}
