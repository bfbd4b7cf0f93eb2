//! Layered run configuration.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults (the walls preset, 600 ticks, 100 boids)
//! 2. `<dir>/default.toml`
//! 3. `<dir>/user.toml`
//! 4. environment variables (`FLOCKING_SECTION__KEY`)
//!
//! Command-line flags are applied on top by the binary.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use flocking_shared::FlockSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything the headless runner needs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Flock tuning, a preset plus overrides
    #[serde(default)]
    pub flock: FlockSettings,
    /// Run length, population and output
    #[serde(default)]
    pub run: RunSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunSettings {
    /// Number of ticks to simulate
    pub ticks: u64,
    /// Boids spawned at random positions before the first tick
    pub boids: usize,
    /// RNG seed; a random seed is drawn when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Log a status line (and write a snapshot) every this many ticks
    pub every: u64,
    /// JSON-lines file receiving snapshots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<PathBuf>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            ticks: 600,
            boids: 100,
            seed: None,
            every: 60,
            snapshots: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, figment::Error> {
        Self::figment(config_dir.as_ref()).extract()
    }

    fn figment(config_dir: &Path) -> Figment {
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        } else {
            log::debug!(
                "No {} found, using built-in defaults",
                default_path.display()
            );
        }

        if user_path.exists() {
            log::debug!("Applying user overrides from {}", user_path.display());
            figment = figment.merge(Toml::file(&user_path));
        }

        // FLOCKING_FLOCK__MAX_SPEED=4 -> flock.max_speed = 4
        figment.merge(Env::prefixed("FLOCKING_").split("__"))
    }
}
