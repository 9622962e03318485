//! Actor state
//!
//! The actor is the one dynamic body in the world. Its position is the
//! centre of its hitbox; the renderer reads position, half-extents and
//! facing, and only the integrator writes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::ActorConfig;
use crate::world::TileGrid;

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Hitbox centre (px)
    pub pos: Vec2,
    /// Velocity (px/s)
    pub vel: Vec2,
    pub half_extents: Vec2,
    /// Standing on something solid after the last tick
    pub on_ground: bool,
    pub facing: Facing,
}

impl Actor {
    pub fn new(pos: Vec2, half_extents: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half_extents,
            on_ground: false,
            facing: Facing::Right,
        }
    }

    /// Actor at rest on its spawn tile
    pub fn spawn(config: &ActorConfig, tile_size: f32) -> Self {
        let (tx, ty) = config.spawn_tile;
        Self::new(
            Vec2::new(tx as f32, ty as f32) * tile_size,
            config.half_extents,
        )
    }

    /// Hitbox as a top-left anchored rectangle
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.half_extents)
    }

    /// Keep the whole hitbox inside a world of `world_size` pixels
    pub fn clamp_to_world(&mut self, world_size: Vec2) {
        let lo = self.half_extents;
        let hi = (world_size - self.half_extents).max(lo);
        self.pos = self.pos.clamp(lo, hi);
    }

    /// Stand on the highest surface under the hitbox, keeping `x`
    pub fn snap_to_surface(&mut self, grid: &TileGrid) {
        let ts = grid.tile_size();
        let rect = self.rect();
        let x0 = (rect.min().x / ts).floor() as i32;
        let x1 = ((rect.max().x / ts).ceil() as i32 - 1).max(x0);
        let surface = (x0..=x1)
            .filter_map(|x| grid.surface_row(x))
            .min()
            .unwrap_or(grid.height());
        self.pos.y = surface as f32 * ts - self.half_extents.y;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }
}
