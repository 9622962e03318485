//! Per-tick physics integration
//!
//! Advances the actor by one frame: input response, gravity, capped
//! integration, then collision resolution against the tile grid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Resolution, resolve};
use super::state::{Actor, Facing};
use crate::config::PhysicsTuning;
use crate::world::TileGrid;

/// Input snapshot for a single tick, polled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Regenerate the world with a new seed (handled by the session)
    pub regenerate: bool,
}

/// Clamp a frame delta to `[0, max_dt]`; non-finite deltas become zero
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}

/// Advance the actor by one tick against a read-only grid
pub fn tick(
    actor: &mut Actor,
    grid: &TileGrid,
    input: &TickInput,
    tuning: &PhysicsTuning,
    dt: f32,
) {
    let dt = clamp_dt(dt, tuning.max_dt);

    // Horizontal: direct speed while exactly one direction is held
    match (input.left, input.right) {
        (true, false) => {
            actor.vel.x = -tuning.move_speed;
            actor.facing = Facing::Left;
        }
        (false, true) => {
            actor.vel.x = tuning.move_speed;
            actor.facing = Facing::Right;
        }
        _ => {
            actor.vel.x *= tuning.friction;
            if actor.vel.x.abs() < tuning.stop_threshold {
                actor.vel.x = 0.0;
            }
        }
    }

    // Vertical: gravity always, jump replaces velocity outright
    actor.vel.y += tuning.gravity * dt;
    if input.jump && actor.on_ground {
        actor.vel.y = -tuning.jump_speed;
    }

    // Capped step so a single tick never skips a tile
    let step = Vec2::splat(tuning.max_step);
    let delta = (actor.vel * dt).clamp(-step, step);
    let pre_move_y = actor.rect().pos.y;
    actor.pos += delta;

    let resolution = resolve(grid, actor.rect(), pre_move_y);
    apply_resolution(actor, resolution);

    let world_size = Vec2::new(grid.width() as f32, grid.height() as f32) * grid.tile_size();
    actor.clamp_to_world(world_size);
}

/// Apply a collision correction to the actor's position, grounding and velocity
pub(crate) fn apply_resolution(actor: &mut Actor, resolution: Resolution) {
    actor.pos += resolution.offset;
    // An upward push during an ascending frame is a corner clip, not a landing
    actor.on_ground = resolution.on_ground && actor.vel.y >= 0.0;
    if resolution.offset.y != 0.0 {
        actor.vel.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActorConfig;
    use crate::sim::collision::CONTACT_EPSILON;
    use crate::world::{GridBuilder, TileKind};

    const DT: f32 = 1.0 / 60.0;
    const MAX: f32 = 1.0 / 30.0;

    /// 40x30 grid, Stone from row `floor_row` down
    fn flat_world(floor_row: i32) -> TileGrid {
        let mut builder = GridBuilder::new(40, 30, 32.0).unwrap();
        builder.fill_rows(floor_row, 30, TileKind::Stone);
        builder.build()
    }

    fn spawn() -> Actor {
        Actor::spawn(&ActorConfig::default(), 32.0)
    }

    /// Tick until grounded, returning the number of ticks taken
    fn settle(actor: &mut Actor, grid: &TileGrid, tuning: &PhysicsTuning) -> usize {
        for n in 0..600 {
            tick(actor, grid, &TickInput::default(), tuning, DT);
            if actor.on_ground {
                return n + 1;
            }
        }
        panic!("actor never landed: {:?}", actor);
    }

    #[test]
    fn test_single_gravity_tick() {
        let grid = flat_world(20);
        let tuning = PhysicsTuning::default();
        let mut actor = spawn();
        assert_eq!(actor.pos, Vec2::new(320.0, 320.0));
        let start = actor.pos;

        tick(&mut actor, &grid, &TickInput::default(), &tuning, DT);

        assert!(actor.vel.y > 0.0);
        let moved = actor.pos - start;
        assert!(moved.x.abs() <= tuning.max_step);
        assert!(moved.y.abs() <= tuning.max_step);
        assert!(moved.y > 0.0);
        assert!(!actor.on_ground);
    }

    #[test]
    fn test_dt_is_clamped() {
        assert_eq!(clamp_dt(1.0, MAX), MAX);
        assert_eq!(clamp_dt(-1.0, MAX), 0.0);
        assert_eq!(clamp_dt(f32::NAN, MAX), 0.0);

        let grid = flat_world(20);
        let tuning = PhysicsTuning::default();
        let mut actor = spawn();
        tick(&mut actor, &grid, &TickInput::default(), &tuning, 5.0);
        assert!((actor.vel.y - tuning.gravity * MAX).abs() < 1e-3);
    }

    #[test]
    fn test_lands_on_flat_floor() {
        let grid = flat_world(20);
        let tuning = PhysicsTuning::default();
        let mut actor = spawn();

        let ticks = settle(&mut actor, &grid, &tuning);
        assert!(ticks > 1);
        assert!(actor.on_ground);
        assert_eq!(actor.vel.y, 0.0);
        // Feet flush with the floor top
        assert!((actor.rect().max().y - 640.0).abs() < 1e-2);
        assert!(!actor.rect().overlaps_solid(&grid));

        // Standing still keeps it grounded
        for _ in 0..30 {
            tick(&mut actor, &grid, &TickInput::default(), &tuning, DT);
            assert!(actor.on_ground);
            assert!((actor.rect().max().y - 640.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_jump_only_from_ground() {
        let grid = flat_world(20);
        let tuning = PhysicsTuning::default();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        // Airborne: jump does nothing
        let mut actor = spawn();
        tick(&mut actor, &grid, &jump, &tuning, DT);
        assert!(actor.vel.y > 0.0);

        settle(&mut actor, &grid, &tuning);
        let ground_y = actor.pos.y;
        tick(&mut actor, &grid, &jump, &tuning, DT);
        assert_eq!(actor.vel.y, -tuning.jump_speed);
        assert!(actor.pos.y < ground_y);
        assert!(!actor.on_ground);

        // Holding jump mid-air doesn't re-trigger
        for _ in 0..10 {
            tick(&mut actor, &grid, &jump, &tuning, DT);
            assert!(!actor.on_ground);
            assert!(actor.vel.y > -tuning.jump_speed);
        }
    }

    #[test]
    fn test_ground_flag_suppressed_while_rising() {
        let mut actor = spawn();
        actor.vel.y = -200.0;
        let push_up = Resolution {
            offset: Vec2::new(0.0, -2.0),
            on_ground: true,
        };
        apply_resolution(&mut actor, push_up);
        assert!(!actor.on_ground);
        assert_eq!(actor.vel.y, 0.0);

        actor.vel.y = 10.0;
        apply_resolution(&mut actor, push_up);
        assert!(actor.on_ground);
    }

    #[test]
    fn test_walking_and_friction() {
        let grid = flat_world(20);
        let tuning = PhysicsTuning::default();
        let mut actor = spawn();
        settle(&mut actor, &grid, &tuning);

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut actor, &grid, &left, &tuning, DT);
        assert_eq!(actor.vel.x, -tuning.move_speed);
        assert_eq!(actor.facing, Facing::Left);
        assert!(actor.on_ground);

        // Both held counts as neither: friction
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut actor, &grid, &both, &tuning, DT);
        assert!((actor.vel.x + tuning.move_speed * tuning.friction).abs() < 1e-3);
        assert_eq!(actor.facing, Facing::Left);

        let mut ticks = 0;
        while actor.vel.x != 0.0 {
            tick(&mut actor, &grid, &TickInput::default(), &tuning, DT);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert!(ticks > 1);
    }

    #[test]
    fn test_runs_into_wall_without_passing() {
        let mut builder = GridBuilder::new(40, 30, 32.0).unwrap();
        builder.fill_rows(20, 30, TileKind::Stone);
        builder.fill_rect(15, 0, 15, 19, TileKind::Stone);
        let grid = builder.build();
        let tuning = PhysicsTuning::default();
        let mut actor = spawn();
        settle(&mut actor, &grid, &tuning);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let wall_left = 15.0 * 32.0;
        for _ in 0..120 {
            tick(&mut actor, &grid, &right, &tuning, MAX);
            assert!(actor.rect().max().x <= wall_left + CONTACT_EPSILON);
        }
        assert!((actor.rect().max().x - wall_left).abs() < 1e-2);
        assert!(actor.on_ground);
    }

    #[test]
    fn test_fast_fall_is_capped() {
        let grid = flat_world(20);
        let tuning = PhysicsTuning::default();
        let mut actor = spawn();
        actor.vel.y = 5000.0;
        let start = actor.pos.y;
        tick(&mut actor, &grid, &TickInput::default(), &tuning, MAX);
        assert!((actor.pos.y - start - tuning.max_step).abs() < 1e-4);
    }

    #[test]
    fn test_stays_inside_world() {
        let grid = flat_world(20);
        let tuning = PhysicsTuning::default();
        let mut actor = spawn();
        actor.pos = Vec2::new(-500.0, 100.0);
        tick(&mut actor, &grid, &TickInput::default(), &tuning, DT);
        assert!(actor.rect().min().x >= 0.0);
    }
}
