//! Headless driver for the flocking simulation: layered configuration,
//! scripted spawns and a fixed-length run with periodic status and
//! JSON-lines snapshots.

pub mod runner;
pub mod settings;
pub mod spawn;

pub use runner::{RunSummary, Runner};
pub use settings::{AppConfig, RunSettings};
pub use spawn::{parse_obstacle, parse_spawn};
