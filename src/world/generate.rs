//! Seeded world generation
//!
//! Three ordered passes over a [`GridBuilder`]:
//! 1. Heightmap: octave noise picks the ground row of every column, then
//!    Grass, four Dirt and Stone are laid down beneath it
//! 2. Lakes: lens-shaped water pockets cut into high ground
//! 3. Trees: trunks with diamond canopies on gentle grassy slopes
//!
//! Passes 2 and 3 share one PRNG and draw from it strictly in column order,
//! and only once a column's deterministic checks pass, so the whole world is
//! a pure function of the seed.

use serde::{Deserialize, Serialize};

use super::grid::{GridBuilder, TileGrid, TileKind};
use super::noise::NoiseField;
use super::rng::WorldRng;
use crate::config::{GenerationConfig, WorldConfig};
use crate::error::ConfigError;

/// Ground row baseline as a fraction of world height
const GROUND_BASE: f64 = 0.45;
/// Extra depth the noise can add, as a fraction of world height
const MOUNTAIN_RANGE: f64 = 0.25;
/// Dirt rows between the grass and the stone
pub const DIRT_DEPTH: i32 = 4;

/// Columns excluded from lake carving at each edge
const LAKE_MARGIN: i32 = 2;
/// Lakes only start where the surface is above this fraction of the height
const LAKE_MAX_SURFACE: f64 = 0.55;
const LAKE_CHANCE: f64 = 0.06;
const LAKE_MIN_HALF_WIDTH: i32 = 3;
const LAKE_MAX_HALF_WIDTH: i32 = 8;
/// Keeps the edge columns of a lake at depth one
const LAKE_EDGE_EPSILON: f64 = 0.001;

const TREE_CHANCE: f64 = 0.08;
const TREE_MAX_SLOPE: i32 = 2;
const TRUNK_MIN: i32 = 4;
const TRUNK_MAX: i32 = 6;

/// A carved lake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lake {
    /// Centre column
    pub x: i32,
    /// Surface row of the centre column when the lake was placed
    pub surface: i32,
    pub half_width: i32,
}

/// A placed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub x: i32,
    /// Grass row the trunk stands on
    pub surface: i32,
    pub trunk_height: i32,
}

impl Tree {
    /// Row of the highest trunk tile
    pub fn top(&self) -> i32 {
        self.surface - self.trunk_height
    }
}

/// What a generation run placed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: i32,
    /// Ground row per column from the heightmap pass
    pub heights: Vec<i32>,
    pub lakes: Vec<Lake>,
    pub trees: Vec<Tree>,
}

/// Ground row for a noise sample in a world `height` rows tall
pub fn ground_row(noise: f64, height: i32) -> i32 {
    let h = height as f64;
    let mountain = (noise * 0.5 + 0.5) * h * MOUNTAIN_RANGE;
    let row = (h * GROUND_BASE + mountain).floor() as i32;
    row.clamp(0, height - 1)
}

/// Water depth `dx` columns from the centre of a lake
pub fn lake_depth(dx: i32, half_width: i32) -> i32 {
    let falloff = 1.0 - dx.abs() as f64 / (half_width as f64 + LAKE_EDGE_EPSILON);
    (falloff * 3.0).round() as i32 + 1
}

/// Generate a world with the default noise parameters
pub fn generate(seed: i32, world: &WorldConfig) -> Result<TileGrid, ConfigError> {
    generate_with(seed, world, &GenerationConfig::default()).map(|(grid, _)| grid)
}

/// Generate a world and report what was placed
pub fn generate_with(
    seed: i32,
    world: &WorldConfig,
    params: &GenerationConfig,
) -> Result<(TileGrid, GenerationReport), ConfigError> {
    let mut builder = GridBuilder::from_config(world)?;
    let mut noise = NoiseField::new(seed, params)?;
    let mut rng = WorldRng::from_seed(seed);

    let heights = lay_heightmap(&mut builder, &mut noise);
    let lakes = carve_lakes(&mut builder, &mut rng);
    let trees = place_trees(&mut builder, &mut rng);

    log::info!(
        "Generated world seed {} ({}x{}): {} lakes, {} trees",
        seed,
        world.width,
        world.height,
        lakes.len(),
        trees.len()
    );

    let report = GenerationReport {
        seed,
        heights,
        lakes,
        trees,
    };
    Ok((builder.build(), report))
}

/// Pass 1: columns of Air, Grass, Dirt and Stone
fn lay_heightmap(builder: &mut GridBuilder, noise: &mut NoiseField) -> Vec<i32> {
    let height = builder.height();
    let mut heights = Vec::with_capacity(builder.width() as usize);

    for x in 0..builder.width() {
        let ground = ground_row(noise.sample(x as f64), height);
        for y in 0..height {
            let kind = if y < ground {
                TileKind::Air
            } else if y == ground {
                TileKind::Grass
            } else if y <= ground + DIRT_DEPTH {
                TileKind::Dirt
            } else {
                TileKind::Stone
            };
            builder.set(x, y, kind);
        }
        heights.push(ground);
    }

    log::debug!(
        "Heightmap: rows {}..={}",
        heights.iter().min().copied().unwrap_or(0),
        heights.iter().max().copied().unwrap_or(0)
    );
    heights
}

/// Pass 2: scan columns left to right and drop lakes on high ground
fn carve_lakes(builder: &mut GridBuilder, rng: &mut WorldRng) -> Vec<Lake> {
    let max_surface = builder.height() as f64 * LAKE_MAX_SURFACE;
    let mut lakes = Vec::new();

    for x in LAKE_MARGIN..builder.width() - LAKE_MARGIN {
        let Some(surface) = builder.surface_row(x) else {
            continue;
        };
        if (surface as f64) < max_surface && rng.chance(LAKE_CHANCE) {
            let half_width = rng.range_inclusive(LAKE_MIN_HALF_WIDTH, LAKE_MAX_HALF_WIDTH);
            carve_lake(builder, x, half_width);
            lakes.push(Lake {
                x,
                surface,
                half_width,
            });
        }
    }

    log::debug!("Lakes: {:?}", lakes);
    lakes
}

/// Flood the top rows of every column within `half_width` of `x`
pub(crate) fn carve_lake(builder: &mut GridBuilder, x: i32, half_width: i32) {
    for dx in -half_width..=half_width {
        let col = x + dx;
        let Some(surface) = builder.surface_row(col) else {
            continue;
        };
        for y in surface..surface + lake_depth(dx, half_width) {
            builder.set(col, y, TileKind::Water);
        }
    }
}

/// Pass 3: plant trees on grassy columns with gentle slope
fn place_trees(builder: &mut GridBuilder, rng: &mut WorldRng) -> Vec<Tree> {
    let mut trees = Vec::new();

    for x in 1..builder.width() - 1 {
        let (Some(left), Some(surface), Some(right)) = (
            builder.surface_row(x - 1),
            builder.surface_row(x),
            builder.surface_row(x + 1),
        ) else {
            continue;
        };
        let slope = (surface - left).abs() + (surface - right).abs();
        if slope > TREE_MAX_SLOPE || builder.get(x, surface) != TileKind::Grass {
            continue;
        }
        if !rng.chance(TREE_CHANCE) {
            continue;
        }

        let tree = Tree {
            x,
            surface,
            trunk_height: rng.range_inclusive(TRUNK_MIN, TRUNK_MAX),
        };
        grow_tree(builder, &tree);
        trees.push(tree);
    }

    log::debug!("Trees: {}", trees.len());
    trees
}

/// Trunk of Wood topped by a diamond of Leaf
fn grow_tree(builder: &mut GridBuilder, tree: &Tree) {
    for dy in 1..=tree.trunk_height {
        builder.set(tree.x, tree.surface - dy, TileKind::Wood);
    }

    // Canopy offsets are measured upward from the trunk top
    let top = tree.top();
    for dx in -2..=2i32 {
        for dy in -1..=2i32 {
            if dx.abs() + dy.abs() <= 3 {
                builder.set(tree.x + dx, top - dy, TileKind::Leaf);
            }
        }
    }
    builder.set(tree.x, top - 1, TileKind::Leaf);
}
