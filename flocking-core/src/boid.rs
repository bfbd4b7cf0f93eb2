use crate::color::Rgba;
use crate::config::{FlockConfig, Palette};
use crate::vector::Vector2D;
use flocking_shared::BoidState;
use rand::Rng;

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Colour as currently drawn; drifts toward the neighbours
    pub color: Rgba,
    /// Colour at spawn time; this is what neighbours blend toward
    pub original_color: Rgba,
    /// Half-extent of the drawn square
    pub size: u8,
    /// Countdown to the next neighbour refresh; refreshes at zero
    pub think: u32,
    /// Remaining life, `None` for immortal boids
    pub life: Option<f32>,
    /// Indices of nearby boids in the owning flock
    pub friends: Vec<usize>,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D, color: Rgba) -> Self {
        Self {
            position,
            velocity,
            color,
            original_color: color,
            size: 1,
            think: 0,
            life: None,
            friends: Vec::new(),
        }
    }

    /// A boid moving at `speed` toward `angle_degrees`, measured counter-clockwise
    /// with screen y pointing down.
    pub fn heading(position: Vector2D, angle_degrees: f32, speed: f32, color: Rgba) -> Self {
        let angle = angle_degrees.to_radians();
        let velocity = Vector2D::new(speed * angle.cos(), -speed * angle.sin());
        Self::new(position, velocity, color)
    }

    /// A freshly spawned boid with the randomised heading, size, think offset
    /// and life the sketches give a clicked-in boid.
    pub fn spawn<R: Rng + ?Sized>(
        position: Vector2D,
        color: Rgba,
        config: &FlockConfig,
        rng: &mut R,
    ) -> Self {
        let flip = if rng.gen::<f32>() > 0.5 { 1.0 } else { -1.0 };
        let angle = (90.0 + rng.gen::<f32>()) * 180.0 * flip;
        let speed = config.max_speed * rng.gen::<f32>();

        let mut boid = Self::heading(position, angle, speed, color);
        boid.size = rng.gen_range(1..=2);
        boid.think = rng.gen_range(0..config.think_period.max(1));
        boid.life = config.lifespan.map(|max| rng.gen::<f32>() * max);
        boid
    }

    /// Spawn somewhere in the world with a colour from the configured palette
    pub fn random<R: Rng + ?Sized>(config: &FlockConfig, rng: &mut R) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..config.width),
            rng.gen_range(0.0..config.height),
        );
        let color = random_color(config.palette, rng);
        Self::spawn(position, color, config, rng)
    }

    /// Advance the think countdown and burn life
    pub fn age(&mut self, config: &FlockConfig) {
        if let Some(life) = self.life.as_mut() {
            if *life > 0.0 {
                *life -= config.life_decay;
            }
        }
        self.think = (self.think + 1) % config.think_period.max(1);
    }

    pub fn should_think(&self) -> bool {
        self.think == 0
    }

    pub fn is_alive(&self) -> bool {
        self.life.map_or(true, |life| life > 0.0)
    }

    /// Take the steered velocity, keeping its direction but pinning the
    /// speed to `max_speed`
    pub fn steer(&mut self, velocity: Vector2D, max_speed: f32) {
        self.velocity = velocity.with_magnitude(max_speed);
    }

    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        if self.position.x < 0.0 {
            self.position.x = width;
        } else if self.position.x > width {
            self.position.x = 0.0;
        }

        if self.position.y < 0.0 {
            self.position.y = height;
        } else if self.position.y > height {
            self.position.y = 0.0;
        }
    }

    pub fn contain_within_bounds(&mut self, width: f32, height: f32) {
        // Bounce off edges by reversing velocity component
        if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > width {
            self.position.x = width;
            self.velocity.x = -self.velocity.x.abs();
        }

        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > height {
            self.position.y = height;
            self.velocity.y = -self.velocity.y.abs();
        }
    }

    pub fn state(&self) -> BoidState {
        BoidState {
            position: self.position.into(),
            velocity: self.velocity.into(),
            color: self.color.to_array(),
            size: self.size,
            life: self.life,
        }
    }
}

pub fn random_color<R: Rng + ?Sized>(palette: Palette, rng: &mut R) -> Rgba {
    match palette {
        Palette::Bright => Rgba::bright(rng),
        Palette::Random => Rgba::random(rng),
        Palette::Dominant => Rgba::dominant(rng),
    }
}
