//! Simulation parameters.
//!
//! [`FlockConfig`] holds every tunable of the step. The three presets mirror
//! the parameter sets of the original flocking sketches: a global scale is
//! applied to speed, desire and radii, and the crowd/cohesion radii are
//! derived from the friend radius.

use crate::color::Rgba;
use crate::vector::Vector2D;
use flocking_shared::{EdgeMode, FlockSettings, Preset};
use std::fmt;

/// How spawned boids pick their colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Bright,
    Random,
    Dominant,
}

/// Ring of obstacles placed along the world border on setup/reset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallLayout {
    /// Distance of the ring from the world border
    pub inset: f32,
    /// Gap between neighbouring wall obstacles
    pub spacing: f32,
    /// Shift applied along the edge
    pub offset: f32,
}

/// Configuration for the flock simulation
#[derive(Debug, Clone, PartialEq)]
pub struct FlockConfig {
    pub width: f32,
    pub height: f32,
    pub edge_mode: EdgeMode,
    pub max_speed: f32,
    pub desire_amount: f32,
    pub friend_radius: f32,
    pub crowd_radius: f32,
    pub avoid_radius: f32,
    pub cohese_radius: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub avoidance_weight: f32,
    /// Half-width of the uniform jitter added every tick
    pub noise: f32,
    /// Ticks between neighbour list refreshes
    pub think_period: u32,
    /// Fraction of the mean neighbour colour delta applied per tick
    pub color_blend: f32,
    /// Upper bound of a new boid's life; `None` means boids live forever
    pub lifespan: Option<f32>,
    pub life_decay: f32,
    /// Wind pushing the whole flock; enables momentum steering when set
    pub wind: Option<Vector2D>,
    pub walls: Option<WallLayout>,
    pub palette: Palette,
    pub obstacle_color: Rgba,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self::preset(Preset::Walls)
    }
}

impl FlockConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Walls => Self::walls(),
            Preset::Groups => Self::groups(),
            Preset::Classic => Self::classic(),
        }
    }

    /// Short-lived, bright boids bouncing around inside a wall ring
    pub fn walls() -> Self {
        let scale = 0.78;
        let friend_radius = 30.0 * scale;

        Self {
            width: 960.0,
            height: 540.0,
            edge_mode: EdgeMode::Wrap,
            max_speed: 3.0 * scale,
            desire_amount: 1.0 * scale,
            friend_radius,
            crowd_radius: friend_radius / 1.4,
            avoid_radius: 16.0 * scale,
            cohese_radius: friend_radius / 0.9,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            separation_weight: 1.0,
            avoidance_weight: 1.0,
            noise: 0.05,
            think_period: 5,
            color_blend: 0.3,
            lifespan: Some(15.0),
            life_decay: 0.01,
            wind: None,
            walls: Some(WallLayout {
                inset: 50.0,
                spacing: 15.0,
                offset: 5.0,
            }),
            palette: Palette::Bright,
            obstacle_color: Rgba::STONE,
        }
    }

    /// Large loose groups drifting with a steerable wind
    pub fn groups() -> Self {
        let scale = 1.28;
        let friend_radius = 150.0 * scale;

        Self {
            width: 960.0,
            height: 540.0,
            edge_mode: EdgeMode::Wrap,
            max_speed: 3.0 * scale,
            desire_amount: 0.9 * scale,
            friend_radius,
            crowd_radius: friend_radius / 0.4,
            avoid_radius: 16.0 * scale,
            cohese_radius: friend_radius / 2.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            separation_weight: 1.0,
            avoidance_weight: 1.0,
            noise: 0.05,
            think_period: 5,
            color_blend: 0.3,
            lifespan: None,
            life_decay: 0.0,
            wind: Some(Vector2D::zero()),
            walls: None,
            palette: Palette::Random,
            obstacle_color: Rgba::SHADOW,
        }
    }

    /// Small world with a tight wall ring and slower thinking
    pub fn classic() -> Self {
        let scale = 0.98;
        let friend_radius = 120.0 * scale;

        Self {
            width: 384.0,
            height: 216.0,
            edge_mode: EdgeMode::Wrap,
            max_speed: 2.1 * scale,
            desire_amount: 0.5 * scale,
            friend_radius,
            crowd_radius: friend_radius / 1.3,
            avoid_radius: 30.0 * scale,
            cohese_radius: friend_radius / 4.1,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            separation_weight: 1.0,
            avoidance_weight: 1.0,
            noise: 0.05,
            think_period: 10,
            color_blend: 0.3,
            lifespan: None,
            life_decay: 0.0,
            wind: None,
            walls: Some(WallLayout {
                inset: 10.0,
                spacing: 15.0,
                offset: 5.0,
            }),
            palette: Palette::Random,
            obstacle_color: Rgba::STONE,
        }
    }

    /// Build a config from a preset plus the overrides present in `settings`
    pub fn from_settings(settings: &FlockSettings) -> Self {
        let mut config = Self::preset(settings.preset);
        config.apply(settings);
        config
    }

    /// Overwrite every field that `settings` sets explicitly
    pub fn apply(&mut self, settings: &FlockSettings) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = settings.$field {
                    self.$field = value;
                })*
            };
        }

        take!(
            width,
            height,
            edge_mode,
            max_speed,
            desire_amount,
            friend_radius,
            crowd_radius,
            avoid_radius,
            cohese_radius,
            alignment_weight,
            cohesion_weight,
            separation_weight,
            avoidance_weight,
            noise,
            think_period,
            color_blend,
        );

        if let Some(lifespan) = settings.lifespan {
            self.lifespan = (lifespan > 0.0).then_some(lifespan);
            if self.lifespan.is_some() && self.life_decay == 0.0 {
                self.life_decay = 0.01;
            }
        }

        if settings.walls == Some(false) {
            self.walls = None;
        } else if settings.walls == Some(true) && self.walls.is_none() {
            self.walls = FlockConfig::walls().walls;
        }
    }

    pub fn set_desire_amount(&mut self, amount: f32) {
        self.desire_amount = amount;
    }

    pub fn adjust_desire_amount(&mut self, delta: f32) {
        self.desire_amount += delta;
    }

    /// Change the cruising speed; the old speed stays on a rejected value
    pub fn set_max_speed(&mut self, speed: f32) -> Result<(), ConfigError> {
        if !speed.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "max_speed",
                value: speed,
            });
        }
        if speed <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "max_speed",
                value: speed,
            });
        }
        self.max_speed = speed;
        Ok(())
    }

    pub fn set_wind(&mut self, wind: Vector2D) {
        self.wind = Some(wind);
    }

    /// Nudge the wind; turns wind on if the preset had none
    pub fn adjust_wind(&mut self, delta: Vector2D) {
        let wind = self.wind.get_or_insert_with(Vector2D::zero);
        *wind += delta;
    }

    /// Reject values that would make the step produce NaNs or never refresh
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("max_speed", self.max_speed),
            ("friend_radius", self.friend_radius),
            ("crowd_radius", self.crowd_radius),
            ("avoid_radius", self.avoid_radius),
            ("cohese_radius", self.cohese_radius),
        ];

        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let finite = [
            ("desire_amount", self.desire_amount),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("separation_weight", self.separation_weight),
            ("avoidance_weight", self.avoidance_weight),
            ("noise", self.noise),
            ("color_blend", self.color_blend),
            ("life_decay", self.life_decay),
        ];

        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.think_period == 0 {
            return Err(ConfigError::ZeroThinkPeriod);
        }

        if let Some(walls) = self.walls {
            if !(walls.spacing > 0.0) {
                return Err(ConfigError::NotPositive {
                    field: "walls.spacing",
                    value: walls.spacing,
                });
            }
        }

        Ok(())
    }
}

/// Invalid simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotFinite { field: &'static str, value: f32 },
    NotPositive { field: &'static str, value: f32 },
    ZeroThinkPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field, value } => {
                write!(f, "{} must be finite, got {}", field, value)
            }
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero, got {}", field, value)
            }
            ConfigError::ZeroThinkPeriod => write!(f, "think_period must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for preset in Preset::ALL {
            assert_eq!(FlockConfig::preset(preset).validate(), Ok(()), "{}", preset);
        }
    }

    #[test]
    fn test_walls_derived_radii() {
        let config = FlockConfig::walls();
        assert!((config.friend_radius - 23.4).abs() < 1e-4);
        assert!((config.crowd_radius - 23.4 / 1.4).abs() < 1e-4);
        assert!((config.cohese_radius - 26.0).abs() < 1e-4);
    }

    #[test]
    fn test_settings_override_preset() {
        let settings = FlockSettings {
            preset: Preset::Groups,
            max_speed: Some(7.0),
            think_period: Some(3),
            walls: Some(true),
            ..FlockSettings::default()
        };

        let config = FlockConfig::from_settings(&settings);
        assert_eq!(config.max_speed, 7.0);
        assert_eq!(config.think_period, 3);
        assert_eq!(config.friend_radius, FlockConfig::groups().friend_radius);
        assert!(config.walls.is_some());
    }

    #[test]
    fn test_zero_lifespan_disables_culling() {
        let settings = FlockSettings {
            lifespan: Some(0.0),
            ..FlockSettings::default()
        };
        assert_eq!(FlockConfig::from_settings(&settings).lifespan, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FlockConfig::walls();
        config.friend_radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "friend_radius", .. })
        ));

        let mut config = FlockConfig::walls();
        config.max_speed = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "max_speed", .. })
        ));

        let mut config = FlockConfig::classic();
        config.think_period = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroThinkPeriod));
    }

    #[test]
    fn test_adjust_wind_turns_wind_on() {
        let mut config = FlockConfig::walls();
        assert_eq!(config.wind, None);
        config.adjust_wind(Vector2D::new(0.2, 0.0));
        config.adjust_wind(Vector2D::new(0.2, -0.2));
        assert_eq!(config.wind, Some(Vector2D::new(0.4, -0.2)));
    }

    #[test]
    fn test_set_max_speed_rejects_bad_values() {
        let mut config = FlockConfig::walls();
        let before = config.max_speed;

        assert!(matches!(
            config.set_max_speed(f32::NAN),
            Err(ConfigError::NotFinite { field: "max_speed", .. })
        ));
        assert!(matches!(
            config.set_max_speed(0.0),
            Err(ConfigError::NotPositive { field: "max_speed", .. })
        ));
        assert_eq!(config.max_speed, before);

        config.set_max_speed(4.5).unwrap();
        assert_eq!(config.max_speed, 4.5);
        assert!(config.validate().is_ok());
    }
}
