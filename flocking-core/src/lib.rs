//! Boids flocking simulation.
//!
//! A [`Flock`] owns its boids, obstacles and [`FlockConfig`]. Each call to
//! [`Flock::step`] ages every boid, refreshes the neighbour lists whose think
//! countdown ran out, applies the alignment, cohesion, separation and
//! obstacle-avoidance rules plus a little jitter, pins the speed to
//! `max_speed`, blends colours and moves everything one Euler step.
//!
//! Randomness is always passed in, so a seeded RNG gives a reproducible run.

pub mod behavior;
pub mod boid;
pub mod color;
pub mod config;
pub mod flock;
pub mod obstacle;
pub mod render;
pub mod vector;

pub use behavior::Steering;
pub use boid::Boid;
pub use color::Rgba;
pub use config::{ConfigError, FlockConfig, Palette, WallLayout};
pub use flock::Flock;
pub use obstacle::{wall_ring, Obstacle};
pub use render::{render, Canvas};
pub use vector::Vector2D;

pub use flocking_shared::{EdgeMode, Preset};
