//! Frame-loop driver
//!
//! A [`Session`] owns everything the frame loop mutates: the current grid,
//! the actor, frame timing and FPS measurement. The platform scheduler calls
//! [`Session::frame`] once per display refresh with a monotonic timestamp and
//! must re-register with the returned [`FrameToken`] to keep going.
//!
//! Regenerating the world bumps the session epoch, so any callback still
//! holding an older token is ignored instead of ticking against the new grid.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ReseedPolicy};
use crate::error::ConfigError;
use crate::sim::{Actor, tick};
use crate::world::{TileGrid, generate_with};

pub use crate::sim::TickInput;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Registration handle for the next frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken {
    epoch: u64,
}

/// Values shown by the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebugSnapshot {
    pub seed: i32,
    pub x: f32,
    pub y: f32,
    pub fps: u32,
}

/// One running world plus its actor and frame timing
#[derive(Debug)]
pub struct Session {
    config: Config,
    seed: i32,
    grid: TileGrid,
    actor: Actor,
    /// Source of seeds for in-game regeneration
    seeds: Pcg32,
    epoch: u64,
    last_time: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Session {
    /// Validate the config, generate the first world and spawn the actor
    pub fn new(config: Config, seed: i32) -> Result<Self, ConfigError> {
        config.validate()?;
        let (grid, _) = generate_with(seed, &config.world, &config.generation)?;
        let actor = Actor::spawn(&config.actor, config.world.tile_size);
        log::info!(
            "Session started: seed {}, {}x{} tiles, reseed policy {}",
            seed,
            grid.width(),
            grid.height(),
            config.reseed_policy.as_str()
        );

        Ok(Self {
            config,
            seed,
            grid,
            actor,
            seeds: Pcg32::seed_from_u64(seed as i64 as u64),
            epoch: 0,
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Measured frames per second over the last [`FPS_WINDOW`] frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// World extent in pixels
    pub fn world_size(&self) -> Vec2 {
        self.config.world.pixel_size()
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            seed: self.seed,
            x: self.actor.pos.x,
            y: self.actor.pos.y,
            fps: self.fps,
        }
    }

    /// Token for the first frame callback of the current world
    pub fn start(&mut self) -> FrameToken {
        self.last_time = None;
        FrameToken { epoch: self.epoch }
    }

    /// Whether a token still belongs to the current world
    pub fn is_current(&self, token: FrameToken) -> bool {
        token.epoch == self.epoch
    }

    /// Run one frame callback.
    ///
    /// Returns the token to re-register with, or `None` if `token` was
    /// issued before the last regeneration and the callback should stop.
    pub fn frame(
        &mut self,
        token: FrameToken,
        timestamp_ms: f64,
        input: &TickInput,
    ) -> Option<FrameToken> {
        if !self.is_current(token) {
            log::debug!(
                "Dropping stale frame callback (epoch {} != {})",
                token.epoch,
                self.epoch
            );
            return None;
        }

        let dt = match self.last_time {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(timestamp_ms);
        self.record_frame(timestamp_ms);

        if input.regenerate {
            let seed = self.seeds.random::<i32>();
            return match self.regenerate(seed) {
                Ok(next) => Some(next),
                Err(e) => {
                    log::error!("Regeneration with seed {} failed: {}", seed, e);
                    Some(token)
                }
            };
        }

        // First frame of a cycle: no time elapsed, leave the ground flag alone
        if dt > 0.0 {
            tick(
                &mut self.actor,
                &self.grid,
                input,
                &self.config.physics,
                dt,
            );
        }
        Some(token)
    }

    /// Replace the world with one generated from `seed`.
    ///
    /// Every previously issued token becomes stale; the returned token
    /// starts the new tick cycle.
    pub fn regenerate(&mut self, seed: i32) -> Result<FrameToken, ConfigError> {
        let (grid, report) = generate_with(seed, &self.config.world, &self.config.generation)?;
        self.grid = grid;
        self.seed = seed;
        self.epoch += 1;

        match self.config.reseed_policy {
            ReseedPolicy::Keep => {}
            ReseedPolicy::Respawn => {
                self.actor = Actor::spawn(&self.config.actor, self.config.world.tile_size);
            }
            ReseedPolicy::SnapToSurface => self.actor.snap_to_surface(&self.grid),
        }

        log::info!(
            "Regenerated world: seed {} ({} lakes, {} trees), actor at ({:.1}, {:.1})",
            seed,
            report.lakes.len(),
            report.trees.len(),
            self.actor.pos.x,
            self.actor.pos.y
        );
        Ok(self.start())
    }

    fn record_frame(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(FPS_WINDOW);

        if self.frames_seen < 2 {
            return;
        }
        // Oldest sample still in the window
        let oldest_idx = if self.frames_seen < FPS_WINDOW {
            0
        } else {
            self.frame_index
        };
        let elapsed = time - self.frame_times[oldest_idx];
        if elapsed > 0.0 {
            let intervals = (self.frames_seen - 1) as f64;
            self.fps = (intervals * 1000.0 / elapsed).round() as u32;
        }
    }
}
