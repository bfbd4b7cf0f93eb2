use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a 2D position in world coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Named parameter sets taken from the flocking sketches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Short-lived boids fenced in by a ring of obstacles
    #[default]
    Walls,
    /// Wide friend radius with a steerable wind
    Groups,
    /// Slower flock with a longer think period
    Classic,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Walls, Preset::Groups, Preset::Classic];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Walls => "walls",
            Preset::Groups => "groups",
            Preset::Classic => "classic",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a preset name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown preset '{}' (expected one of: walls, groups, classic)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

/// What happens when a boid leaves the world rectangle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    /// Reappear on the opposite edge
    #[default]
    Wrap,
    /// Clamp to the edge and reflect the velocity
    Bounce,
}

/// Flock tuning as read from config files or sent by a front-end.
///
/// Every field except `preset` is an override: `None` keeps the preset's value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub preset: Preset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_mode: Option<EdgeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desire_amount: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crowd_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohese_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohesion_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoidance_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub think_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_blend: Option<f32>,
    /// Maximum initial life; `Some(0.0)` disables the lifespan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walls: Option<bool>,
}

impl FlockSettings {
    pub fn for_preset(preset: Preset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }
}

/// Request to spawn `count` boids at a position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpawnRequest {
    pub position: Position,
    pub count: usize,
    /// RGB colour; `None` uses the current brush colour
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

/// Request to place a static obstacle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObstacleRequest {
    pub position: Position,
    #[serde(default)]
    pub size: f32,
}

/// Status summary of a running simulation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub tick: u64,
    pub boid_count: usize,
    pub obstacle_count: usize,
    pub fps: u32,
}

/// State of a single boid inside a snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoidState {
    pub position: Position,
    pub velocity: Position,
    pub color: [u8; 4],
    pub size: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life: Option<f32>,
}

/// Full state of the world at one tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlockSnapshot {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub boids: Vec<BoidState>,
    pub obstacles: Vec<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str() {
        assert_eq!("walls".parse::<Preset>(), Ok(Preset::Walls));
        assert_eq!(" Groups ".parse::<Preset>(), Ok(Preset::Groups));
        assert_eq!("CLASSIC".parse::<Preset>(), Ok(Preset::Classic));
        assert!("plasma".parse::<Preset>().is_err());
    }

    #[test]
    fn test_settings_partial_toml() {
        let settings: FlockSettings = toml::from_str(
            r#"
            preset = "groups"
            max_speed = 4.5
            edge_mode = "bounce"
            "#,
        )
        .unwrap();

        assert_eq!(settings.preset, Preset::Groups);
        assert_eq!(settings.max_speed, Some(4.5));
        assert_eq!(settings.edge_mode, Some(EdgeMode::Bounce));
        assert_eq!(settings.friend_radius, None);
    }

    #[test]
    fn test_settings_skip_unset_fields() {
        let settings = FlockSettings::for_preset(Preset::Classic);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"preset":"classic"}"#);
    }

    #[test]
    fn test_spawn_request_default_color() {
        let req: SpawnRequest =
            serde_json::from_str(r#"{"position":{"x":1.0,"y":2.0},"count":3}"#).unwrap();
        assert_eq!(req.count, 3);
        assert_eq!(req.color, None);
    }
}
