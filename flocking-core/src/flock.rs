use crate::behavior::{self, Steering};
use crate::boid::{random_color, Boid};
use crate::color::Rgba;
use crate::config::FlockConfig;
use crate::obstacle::{wall_ring, Obstacle};
use crate::vector::Vector2D;
use flocking_shared::{EdgeMode, FlockSnapshot, StatusResponse};
use rand::Rng;

/// The boids and obstacles of one world, advanced one tick at a time
#[derive(Debug, Clone)]
pub struct Flock {
    pub boids: Vec<Boid>,
    pub obstacles: Vec<Obstacle>,
    pub config: FlockConfig,
    /// Colour given to boids spawned without an explicit one
    pub brush: Rgba,
    tick: u64,
}

impl Flock {
    /// An empty world, with the preset's wall ring if it has one
    pub fn new(config: FlockConfig) -> Self {
        let mut flock = Self {
            boids: Vec::new(),
            obstacles: Vec::new(),
            config,
            brush: Rgba::rgb(255, 255, 255),
            tick: 0,
        };
        flock.build_walls();
        flock
    }

    /// A world populated with `count` boids at random positions
    pub fn with_boids<R: Rng + ?Sized>(config: FlockConfig, count: usize, rng: &mut R) -> Self {
        let mut flock = Self::new(config);
        flock.brush = random_color(flock.config.palette, rng);
        for _ in 0..count {
            let boid = Boid::random(&flock.config, rng);
            flock.boids.push(boid);
        }
        log::debug!("Populated flock with {} boids", count);
        flock
    }

    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn add_boid(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    /// Spawn one boid at `position` in the brush colour
    pub fn spawn_at<R: Rng + ?Sized>(&mut self, position: Vector2D, rng: &mut R) {
        let color = self.brush;
        self.spawn_with_color(position, color, rng);
    }

    pub fn spawn_with_color<R: Rng + ?Sized>(
        &mut self,
        position: Vector2D,
        color: Rgba,
        rng: &mut R,
    ) {
        let boid = Boid::spawn(position, color, &self.config, rng);
        self.boids.push(boid);
    }

    /// Pick a new brush colour, as happens when a drag ends
    pub fn release_brush<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.brush = random_color(self.config.palette, rng);
    }

    pub fn add_obstacle(&mut self, position: Vector2D, size: f32) {
        let color = self.config.obstacle_color;
        self.obstacles.push(Obstacle::new(position, size, color));
    }

    /// Remove every boid and obstacle
    pub fn clear(&mut self) {
        log::debug!(
            "Clearing {} boids and {} obstacles",
            self.boids.len(),
            self.obstacles.len()
        );
        self.boids.clear();
        self.obstacles.clear();
    }

    /// Clear, then put the preset's walls back
    pub fn reset(&mut self) {
        self.clear();
        self.build_walls();
    }

    fn build_walls(&mut self) {
        if let Some(layout) = self.config.walls {
            let walls = wall_ring(
                self.config.width,
                self.config.height,
                &layout,
                self.config.obstacle_color,
            );
            log::debug!("Placed {} wall obstacles", walls.len());
            self.obstacles.extend(walls);
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// All steering is computed from the state at the start of the steering
    /// phase and written back afterwards, so the result does not depend on
    /// the order of the boids.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Self {
            boids,
            obstacles,
            config,
            ..
        } = self;
        let obstacles: &[Obstacle] = obstacles;
        let config: &FlockConfig = config;

        for boid in boids.iter_mut() {
            boid.age(config);
        }

        let refreshed: Vec<(usize, Vec<usize>)> = {
            let all: &[Boid] = boids;
            all.iter()
                .enumerate()
                .filter(|(_, boid)| boid.should_think())
                .map(|(i, _)| (i, behavior::neighbours(i, all, config.friend_radius)))
                .collect()
        };

        log::trace!("Refreshed neighbours for {} boids", refreshed.len());

        for (i, friends) in refreshed {
            boids[i].friends = friends;
        }

        let frozen: &[Boid] = boids;
        let updates: Vec<(Vector2D, Rgba)> = frozen
            .iter()
            .map(|boid| {
                let friends = boid.friends.iter().filter_map(|&j| frozen.get(j));
                let steering = Steering::compute(boid, friends.clone(), obstacles, config, rng);
                let velocity = steering.apply(boid.velocity, config);
                let color = boid
                    .color
                    .drift_toward(friends.map(|f| f.original_color), config.color_blend);
                (velocity, color)
            })
            .collect();

        for (boid, (velocity, color)) in boids.iter_mut().zip(updates) {
            boid.steer(velocity, config.max_speed);
            boid.color = color;
            boid.integrate();

            match config.edge_mode {
                EdgeMode::Wrap => boid.wrap_edges(config.width, config.height),
                EdgeMode::Bounce => boid.contain_within_bounds(config.width, config.height),
            }
        }

        if self.config.lifespan.is_some() {
            self.cull();
        }

        self.tick += 1;
    }

    /// Drop dead boids and remap the survivors' neighbour indices
    fn cull(&mut self) {
        if self.boids.iter().all(Boid::is_alive) {
            return;
        }

        let mut remap = Vec::with_capacity(self.boids.len());
        let mut next = 0;
        for boid in &self.boids {
            if boid.is_alive() {
                remap.push(Some(next));
                next += 1;
            } else {
                remap.push(None);
            }
        }

        let before = self.boids.len();
        self.boids.retain(Boid::is_alive);
        log::debug!("Culled {} boids", before - self.boids.len());

        for boid in &mut self.boids {
            boid.friends = boid
                .friends
                .iter()
                .filter_map(|&j| remap.get(j).copied().flatten())
                .collect();
        }
    }

    pub fn snapshot(&self) -> FlockSnapshot {
        FlockSnapshot {
            tick: self.tick,
            width: self.config.width,
            height: self.config.height,
            boids: self.boids.iter().map(Boid::state).collect(),
            obstacles: self.obstacles.iter().map(|o| o.position.into()).collect(),
        }
    }

    pub fn status(&self, fps: u32) -> StatusResponse {
        StatusResponse {
            tick: self.tick,
            boid_count: self.boids.len(),
            obstacle_count: self.obstacles.len(),
            fps,
        }
    }
}
