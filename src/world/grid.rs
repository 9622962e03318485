//! Tile grid storage
//!
//! Generation writes through a [`GridBuilder`], which owns the tiles
//! exclusively; [`GridBuilder::build`] freezes them into a read-only
//! [`TileGrid`] that the simulation and renderer share.
//!
//! Anything outside `[0, width) x [0, height)` reads as [`TileKind::Stone`],
//! so the world edges behave like solid walls with no special cases.

use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::error::ConfigError;

/// Grid cell category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Wood,
    Leaf,
    Water,
}

impl TileKind {
    /// Whether the actor collides with this tile
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, TileKind::Air | TileKind::Water | TileKind::Leaf)
    }

    /// Single character used by ASCII previews
    pub fn glyph(self) -> char {
        match self {
            TileKind::Air => ' ',
            TileKind::Grass => '"',
            TileKind::Dirt => '%',
            TileKind::Stone => '#',
            TileKind::Wood => '|',
            TileKind::Leaf => '*',
            TileKind::Water => '~',
        }
    }
}

/// Read-only tile grid produced by world generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tile_size: f32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile edge length in pixels
    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Tile at `(x, y)`; Stone outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> TileKind {
        if self.in_bounds(x, y) {
            self.tiles[(y * self.width + x) as usize]
        } else {
            TileKind::Stone
        }
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_solid()
    }

    /// Topmost non-Air row of a column, `None` for an empty or off-grid column
    pub fn surface_row(&self, x: i32) -> Option<i32> {
        surface_of(&self.tiles, self.width, self.height, x)
    }

    /// Row-major view of every tile
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    /// One column, top to bottom
    pub fn column(&self, x: i32) -> Vec<TileKind> {
        (0..self.height).map(|y| self.get(x, y)).collect()
    }

    /// Render a window of the grid as text, one line per row
    pub fn ascii(&self, x0: i32, y0: i32, cols: i32, rows: i32) -> String {
        let mut out = String::with_capacity(((cols.max(0) + 1) * rows.max(0)) as usize);
        for y in y0..y0 + rows {
            for x in x0..x0 + cols {
                out.push(self.get(x, y).glyph());
            }
            out.push('\n');
        }
        out
    }
}

fn surface_of(tiles: &[TileKind], width: i32, height: i32, x: i32) -> Option<i32> {
    if x < 0 || x >= width {
        return None;
    }
    (0..height).find(|&y| tiles[(y * width + x) as usize] != TileKind::Air)
}

/// Mutable grid used while a world is being generated
#[derive(Debug, Clone)]
pub struct GridBuilder {
    width: i32,
    height: i32,
    tile_size: f32,
    tiles: Vec<TileKind>,
}

impl GridBuilder {
    /// All-Air grid; fails on non-positive dimensions or tile size
    pub fn new(width: i32, height: i32, tile_size: f32) -> Result<Self, ConfigError> {
        WorldConfig {
            width,
            height,
            tile_size,
        }
        .validate()?;
        Ok(Self {
            width,
            height,
            tile_size,
            tiles: vec![TileKind::Air; width as usize * height as usize],
        })
    }

    pub fn from_config(config: &WorldConfig) -> Result<Self, ConfigError> {
        Self::new(config.width, config.height, config.tile_size)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile at `(x, y)`; Stone outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> TileKind {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.tiles[(y * self.width + x) as usize]
        } else {
            TileKind::Stone
        }
    }

    /// Write a tile; out-of-bounds writes are dropped
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, kind: TileKind) {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.tiles[(y * self.width + x) as usize] = kind;
        }
    }

    /// Fill rows `y0..y1` across the whole width
    pub fn fill_rows(&mut self, y0: i32, y1: i32, kind: TileKind) -> &mut Self {
        for y in y0..y1 {
            for x in 0..self.width {
                self.set(x, y, kind);
            }
        }
        self
    }

    /// Fill an inclusive rectangle of tiles
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, kind: TileKind) -> &mut Self {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(x, y, kind);
            }
        }
        self
    }

    /// Topmost non-Air row of a column
    pub fn surface_row(&self, x: i32) -> Option<i32> {
        surface_of(&self.tiles, self.width, self.height, x)
    }

    /// Freeze into a read-only grid
    pub fn build(self) -> TileGrid {
        TileGrid {
            width: self.width,
            height: self.height,
            tile_size: self.tile_size,
            tiles: self.tiles,
        }
    }
}
