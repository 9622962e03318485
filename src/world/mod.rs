//! Procedural tile world
//!
//! Everything here is a pure function of the seed: the PRNG feeds the noise
//! field and the generator, which fills a grid through a builder and hands
//! back a read-only [`TileGrid`].

pub mod generate;
pub mod grid;
pub mod noise;
pub mod rng;

pub use generate::{GenerationReport, Lake, Tree, generate, generate_with};
pub use grid::{GridBuilder, TileGrid, TileKind};
pub use noise::NoiseField;
pub use rng::WorldRng;
