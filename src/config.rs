//! World and physics configuration
//!
//! Loaded from JSON on native builds; every field falls back to the
//! defaults in [`crate::consts`] when omitted.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// What happens to the actor when the world is regenerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReseedPolicy {
    /// Leave the actor where it is, even if that is now inside terrain
    #[default]
    Keep,
    /// Move the actor back to the spawn tile with zero velocity
    Respawn,
    /// Keep the column, drop the actor onto the new surface
    SnapToSurface,
}

impl ReseedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReseedPolicy::Keep => "Keep",
            ReseedPolicy::Respawn => "Respawn",
            ReseedPolicy::SnapToSurface => "SnapToSurface",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keep" => Some(ReseedPolicy::Keep),
            "respawn" => Some(ReseedPolicy::Respawn),
            "snap" | "snaptosurface" | "snap_to_surface" => Some(ReseedPolicy::SnapToSurface),
            _ => None,
        }
    }
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width in tiles
    pub width: i32,
    /// Height in tiles
    pub height: i32,
    /// Tile edge length in pixels
    pub tile_size: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            tile_size: TILE_SIZE,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Tile indices are computed in i32
        if self.width <= 0 || self.height <= 0 || self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        Ok(())
    }

    /// World extent in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }
}

/// Noise parameters for the heightmap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub frequency: f64,
    pub octaves: u32,
    pub persistence: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            frequency: NOISE_FREQUENCY,
            octaves: NOISE_OCTAVES,
            persistence: NOISE_PERSISTENCE,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(ConfigError::InvalidNoise("octaves must be at least 1".into()));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(ConfigError::InvalidNoise(format!(
                "frequency {} must be positive",
                self.frequency
            )));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(ConfigError::InvalidNoise(format!(
                "persistence {} must be in (0, 1]",
                self.persistence
            )));
        }
        Ok(())
    }
}

/// Movement and integration tuning (pixels and seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    /// Horizontal damping per tick with no direction held (0-1)
    pub friction: f32,
    pub stop_threshold: f32,
    /// Per-axis displacement cap per tick; must stay below one tile
    pub max_step: f32,
    pub max_dt: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            friction: FRICTION,
            stop_threshold: STOP_THRESHOLD,
            max_step: MAX_STEP,
            max_dt: MAX_DT,
        }
    }
}

impl PhysicsTuning {
    pub fn validate(&self, tile_size: f32) -> Result<(), ConfigError> {
        let non_negative = [
            ("move_speed", self.move_speed),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("stop_threshold", self.stop_threshold),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::InvalidTuning {
                field: "friction",
                value: self.friction,
            });
        }
        // A step of a full tile or more could skip straight through a wall
        if !(self.max_step > 0.0 && self.max_step < tile_size) {
            return Err(ConfigError::InvalidTuning {
                field: "max_step",
                value: self.max_step,
            });
        }
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(ConfigError::InvalidTuning {
                field: "max_dt",
                value: self.max_dt,
            });
        }
        Ok(())
    }
}

/// Actor shape and spawn point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Spawn tile (column, row)
    pub spawn_tile: (i32, i32),
    /// Half-width and half-height in pixels
    pub half_extents: Vec2,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            spawn_tile: SPAWN_TILE,
            half_extents: Vec2::new(ACTOR_HALF_WIDTH, ACTOR_HALF_HEIGHT),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world: WorldConfig,
    pub generation: GenerationConfig,
    pub physics: PhysicsTuning,
    pub actor: ActorConfig,
    pub reseed_policy: ReseedPolicy,
}

impl Config {
    /// Check every section, failing on the first bad value
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.generation.validate()?;
        self.physics.validate(self.world.tile_size)?;
        let half = self.actor.half_extents;
        if !(half.x > 0.0 && half.y > 0.0 && half.is_finite()) {
            return Err(ConfigError::InvalidTuning {
                field: "half_extents",
                value: half.x.min(half.y),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
