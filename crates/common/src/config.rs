use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Flight-model tuning. Rates are per second, damping factors per step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    /// Angular rate applied by each held attitude control (rad/s).
    pub control_rate: f32,
    /// Throttle change per second while a throttle control is held.
    pub throttle_rate: f32,
    /// Target speed at zero throttle.
    pub base_speed: f32,
    /// Target speed added at full throttle.
    pub speed_range: f32,
    /// First-order lag gain pulling speed toward the target.
    pub speed_response: f32,
    pub climb_factor: f32,
    /// Constant sink rate subtracted from the climb rate.
    pub gravity: f32,
    /// Minimum height above terrain.
    pub ground_clearance: f32,
    pub ground_pitch_damping: f32,
    pub ground_speed_damping: f32,
    pub roll_damping: f32,
    pub pitch_damping: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            control_rate: 1.1,
            throttle_rate: 0.45,
            base_speed: 18.0,
            speed_range: 90.0,
            speed_response: 2.0,
            climb_factor: 0.85,
            gravity: 6.2,
            ground_clearance: 4.0,
            ground_pitch_damping: 0.7,
            ground_speed_damping: 0.94,
            roll_damping: 0.985,
            pitch_damping: 0.988,
        }
    }
}

/// Values restored by a reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialState {
    pub position: Vec3,
    pub speed: f32,
    pub throttle: f32,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 80.0, 0.0),
            speed: 42.0,
            throttle: 0.55,
        }
    }
}

/// Pinhole camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub focal_length: f32,
    /// Points with view-space depth below this are not drawn.
    pub near_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            focal_length: 420.0,
            near_plane: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Upper bound on a single step, in seconds.
    pub max_dt: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { max_dt: 0.032 }
    }
}

/// Largest accepted `world.grid_extent`. The grid projects
/// `(2 * extent + 1)^2` vertices every frame.
pub const MAX_GRID_EXTENT: u32 = 256;

/// World generation and scenery parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub ring_count: usize,
    pub ring_seed: u64,
    /// Distance between terrain grid lines.
    pub grid_spacing: f32,
    /// Grid cells drawn on each side of the camera.
    pub grid_extent: u32,
    /// Depth at which grid lines reach minimum opacity.
    pub grid_fade_depth: f32,
    /// Depth at which rings reach minimum opacity.
    pub ring_fade_depth: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ring_count: 24,
            ring_seed: 0x5eed_f11e,
            grid_spacing: 24.0,
            grid_extent: 18,
            grid_fade_depth: 520.0,
            ring_fade_depth: 900.0,
        }
    }
}

/// Complete simulator configuration. Every field defaults to the stock tuning,
/// so a partial YAML document only overrides what it names.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub flight: FlightTuning,
    pub initial: InitialState,
    pub camera: CameraConfig,
    pub frame: FrameConfig,
    pub world: WorldConfig,
}

impl SimConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            (self.camera.focal_length, "camera.focal_length"),
            (self.camera.near_plane, "camera.near_plane"),
            (self.frame.max_dt, "frame.max_dt"),
            (self.world.grid_spacing, "world.grid_spacing"),
            (self.world.grid_fade_depth, "world.grid_fade_depth"),
            (self.world.ring_fade_depth, "world.ring_fade_depth"),
        ];
        for (value, field) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        let dampings = [
            (self.flight.ground_pitch_damping, "flight.ground_pitch_damping"),
            (self.flight.ground_speed_damping, "flight.ground_speed_damping"),
            (self.flight.roll_damping, "flight.roll_damping"),
            (self.flight.pitch_damping, "flight.pitch_damping"),
        ];
        for (value, field) in dampings {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must lie in (0, 1]",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.initial.throttle) {
            return Err(ConfigError::Invalid {
                field: "initial.throttle",
                reason: "must lie in [0, 1]",
            });
        }
        if !(1..=MAX_GRID_EXTENT).contains(&self.world.grid_extent) {
            return Err(ConfigError::Invalid {
                field: "world.grid_extent",
                reason: "must lie in [1, 256]",
            });
        }
        if self.world.ring_count == 0 {
            return Err(ConfigError::Invalid {
                field: "world.ring_count",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
