use crate::settings::RunSettings;
use anyhow::{Context, Result};
use flocking_core::{Flock, FlockConfig, Rgba, Vector2D};
use flocking_shared::{ObstacleRequest, SpawnRequest, StatusResponse};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::time::Instant;

/// Drives a flock headless for a fixed number of ticks
pub struct Runner {
    flock: Flock,
    rng: StdRng,
    seed: u64,
    every: u64,
    snapshots: Option<Box<dyn Write>>,
}

/// What a finished run looked like
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub seed: u64,
    pub last_status: StatusResponse,
    pub snapshots_written: usize,
}

impl Runner {
    pub fn new(config: FlockConfig, run: &RunSettings, spawns: &[SpawnRequest]) -> Result<Self> {
        config.validate().context("Invalid flock configuration")?;

        let seed = run.seed.unwrap_or_else(|| rand::thread_rng().gen());
        log::info!("Seed: {}", seed);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut flock = Flock::with_boids(config, run.boids, &mut rng);

        for request in spawns {
            let position = Vector2D::from(request.position);
            match request.color {
                Some([r, g, b]) => {
                    for _ in 0..request.count {
                        flock.spawn_with_color(position, Rgba::rgb(r, g, b), &mut rng);
                    }
                }
                None => {
                    for _ in 0..request.count {
                        flock.spawn_at(position, &mut rng);
                    }
                    flock.release_brush(&mut rng);
                }
            }
            log::debug!(
                "Spawned {} boids at ({}, {})",
                request.count,
                position.x,
                position.y
            );
        }

        Ok(Self {
            flock,
            rng,
            seed,
            every: run.every.max(1),
            snapshots: None,
        })
    }

    /// Place static obstacles on top of the preset's walls
    pub fn place_obstacles(&mut self, obstacles: &[ObstacleRequest]) {
        for request in obstacles {
            self.flock
                .add_obstacle(Vector2D::from(request.position), request.size);
        }
        if !obstacles.is_empty() {
            log::debug!("Placed {} obstacles", obstacles.len());
        }
    }

    /// Write one JSON snapshot per reporting tick to `out`
    pub fn with_snapshots(mut self, out: Box<dyn Write>) -> Self {
        self.snapshots = Some(out);
        self
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn run(&mut self, ticks: u64) -> Result<RunSummary> {
        log::info!(
            "Running {} ticks with {} boids and {} obstacles",
            ticks,
            self.flock.boids.len(),
            self.flock.obstacles.len()
        );

        let mut window_start = Instant::now();
        let mut window_ticks = 0u64;
        let mut fps = 0;
        let mut snapshots_written = 0;

        for _ in 0..ticks {
            self.flock.step(&mut self.rng);
            window_ticks += 1;

            if self.flock.tick() % self.every == 0 {
                let elapsed = window_start.elapsed().as_secs_f64();
                if elapsed > 0.0 {
                    fps = (window_ticks as f64 / elapsed).round() as u32;
                }
                window_start = Instant::now();
                window_ticks = 0;

                let status = self.flock.status(fps);
                log::info!(
                    "tick {}: {} boids, {} obstacles, {} ticks/s",
                    status.tick,
                    status.boid_count,
                    status.obstacle_count,
                    status.fps
                );

                if self.write_snapshot()? {
                    snapshots_written += 1;
                }
            }
        }

        if let Some(out) = self.snapshots.as_mut() {
            out.flush().context("Failed to flush snapshots")?;
        }

        Ok(RunSummary {
            seed: self.seed,
            last_status: self.flock.status(fps),
            snapshots_written,
        })
    }

    fn write_snapshot(&mut self) -> Result<bool> {
        let Some(out) = self.snapshots.as_mut() else {
            return Ok(false);
        };

        let snapshot = self.flock.snapshot();
        serde_json::to_writer(&mut *out, &snapshot).context("Failed to encode snapshot")?;
        out.write_all(b"\n").context("Failed to write snapshot")?;
        Ok(true)
    }
}
