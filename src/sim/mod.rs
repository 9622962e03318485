//! Deterministic simulation module
//!
//! Physics for the single actor against a read-only tile grid:
//! - Variable timestep, clamped to a maximum
//! - Per-axis displacement capped below one tile
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CONTACT_EPSILON, Rect, Resolution, resolve, resolve_in_place};
pub use state::{Actor, Facing};
pub use tick::{TickInput, clamp_dt, tick};
