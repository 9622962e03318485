//! Tile Sandbox - deterministic tile world generation and platformer physics
//!
//! Core modules:
//! - `world`: Seeded PRNG, octave noise, tile grid and the world generator
//! - `sim`: Collision resolution and the per-tick physics integrator
//! - `session`: Tick-state driver owned by the frame loop
//! - `config`: Data-driven world size and physics tuning

pub mod config;
pub mod error;
pub mod session;
pub mod sim;
pub mod world;

pub use config::{Config, ReseedPolicy};
pub use error::ConfigError;
pub use session::{DebugSnapshot, FrameToken, Session, TickInput};

/// Default configuration constants
pub mod consts {
    /// World width in tiles
    pub const WORLD_WIDTH: i32 = 256;
    /// World height in tiles
    pub const WORLD_HEIGHT: i32 = 96;
    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 32.0;

    /// Horizontal run speed (px/s)
    pub const MOVE_SPEED: f32 = 220.0;
    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 1400.0;
    /// Upward launch speed applied on jump (px/s)
    pub const JUMP_SPEED: f32 = 530.0;
    /// Per-tick horizontal velocity multiplier when no direction is held
    pub const FRICTION: f32 = 0.85;
    /// Horizontal speed below which the actor stops (px/s)
    pub const STOP_THRESHOLD: f32 = 5.0;
    /// Maximum displacement per axis per tick (px), keeps steps below a tile
    pub const MAX_STEP: f32 = 12.0;
    /// Largest timestep a single tick will integrate (s)
    pub const MAX_DT: f32 = 1.0 / 30.0;

    /// Actor spawn tile
    pub const SPAWN_TILE: (i32, i32) = (10, 10);
    /// Actor half-width (px), full width stays under one tile
    pub const ACTOR_HALF_WIDTH: f32 = 12.0;
    /// Actor half-height (px), full height is 1.6 tiles
    pub const ACTOR_HALF_HEIGHT: f32 = TILE_SIZE * 0.8;

    /// Base noise frequency (cycles per tile column)
    pub const NOISE_FREQUENCY: f64 = 0.02;
    /// Noise octave count
    pub const NOISE_OCTAVES: u32 = 4;
    /// Amplitude decay per octave
    pub const NOISE_PERSISTENCE: f64 = 0.5;
}
