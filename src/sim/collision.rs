//! Rectangle vs tile-grid collision
//!
//! Minimum-translation separation of an axis-aligned rectangle from the
//! solid tiles it overlaps. X is resolved completely before Y: the
//! horizontal pass tests the rectangle at its pre-movement Y, the vertical
//! pass at the corrected X. Corners don't slide perfectly, but with per-tick
//! steps below one tile nothing can tunnel.

use glam::Vec2;

use crate::world::TileGrid;

/// Penetrations smaller than this count as touching, not overlapping
pub const CONTACT_EPSILON: f32 = 1e-3;

/// Axis-aligned rectangle in pixels, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle centred on `center` with the given half-extents
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            pos: center - half_extents,
            size: half_extents * 2.0,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Zero, negative or non-finite extents
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0 && self.pos.is_finite() && self.size.is_finite())
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            pos: self.pos + offset,
            size: self.size,
        }
    }

    /// Inclusive tile index range covered by this rectangle, padded by one
    fn tile_window(&self, tile_size: f32) -> (i32, i32, i32, i32) {
        let min = self.min() / tile_size;
        let max = self.max() / tile_size;
        (
            min.x.floor() as i32 - 1,
            min.y.floor() as i32 - 1,
            max.x.floor() as i32 + 1,
            max.y.floor() as i32 + 1,
        )
    }

    /// Whether any solid tile overlaps this rectangle by more than the epsilon
    pub fn overlaps_solid(&self, grid: &TileGrid) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let ts = grid.tile_size();
        let (x0, y0, x1, y1) = self.tile_window(ts);
        for ty in y0..=y1 {
            for tx in x0..=x1 {
                if grid.is_solid(tx, ty) && overlaps(self.pos, self.size, tile_rect(tx, ty, ts)) {
                    return true;
                }
            }
        }
        false
    }
}

/// Correction returned by [`resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    /// Translation to add to the rectangle position
    pub offset: Vec2,
    /// Something pushed the rectangle up out of the floor
    pub on_ground: bool,
}

#[inline]
fn tile_rect(tx: i32, ty: i32, tile_size: f32) -> (Vec2, Vec2) {
    let min = Vec2::new(tx as f32, ty as f32) * tile_size;
    (min, min + Vec2::splat(tile_size))
}

#[inline]
fn overlaps(pos: Vec2, size: Vec2, (tmin, tmax): (Vec2, Vec2)) -> bool {
    let max = pos + size;
    max.x - tmin.x > CONTACT_EPSILON
        && tmax.x - pos.x > CONTACT_EPSILON
        && max.y - tmin.y > CONTACT_EPSILON
        && tmax.y - pos.y > CONTACT_EPSILON
}

/// Smaller-magnitude of the two pushes that clear `[lo, hi)` along one axis
#[inline]
fn min_push(start: f32, extent: f32, lo: f32, hi: f32) -> f32 {
    let push_neg = lo - (start + extent);
    let push_pos = hi - start;
    if push_neg.abs() < push_pos.abs() {
        push_neg
    } else {
        push_pos
    }
}

/// Separate `rect` from the solid tiles of `grid`.
///
/// `pre_move_y` is the rectangle's Y before this step's vertical movement;
/// the horizontal pass is evaluated there so that standing on a floor never
/// reads as a side hit.
pub fn resolve(grid: &TileGrid, rect: Rect, pre_move_y: f32) -> Resolution {
    if rect.is_degenerate() || !pre_move_y.is_finite() {
        return Resolution::default();
    }

    let ts = grid.tile_size();
    let size = rect.size;
    let mut pos = rect.pos;
    let mut offset = Vec2::ZERO;
    let mut on_ground = false;

    // Horizontal pass at the pre-movement Y
    let probe = Rect {
        pos: Vec2::new(pos.x, pre_move_y),
        size,
    };
    let (x0, y0, x1, y1) = probe.tile_window(ts);
    for ty in y0..=y1 {
        for tx in x0..=x1 {
            if !grid.is_solid(tx, ty) {
                continue;
            }
            let tile = tile_rect(tx, ty, ts);
            if overlaps(Vec2::new(pos.x, pre_move_y), size, tile) {
                let push = min_push(pos.x, size.x, tile.0.x, tile.1.x);
                pos.x += push;
                offset.x += push;
            }
        }
    }

    // Vertical pass at the corrected X
    let (x0, y0, x1, y1) = Rect { pos, size }.tile_window(ts);
    for ty in y0..=y1 {
        for tx in x0..=x1 {
            if !grid.is_solid(tx, ty) {
                continue;
            }
            let tile = tile_rect(tx, ty, ts);
            if overlaps(pos, size, tile) {
                let push = min_push(pos.y, size.y, tile.0.y, tile.1.y);
                pos.y += push;
                offset.y += push;
                if push < 0.0 {
                    on_ground = true;
                }
            }
        }
    }

    Resolution { offset, on_ground }
}

/// Resolve a rectangle that has not moved vertically this step
pub fn resolve_in_place(grid: &TileGrid, rect: Rect) -> Resolution {
    resolve(grid, rect, rect.pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{GridBuilder, TileKind};
    use proptest::prelude::*;

    const TS: f32 = 32.0;

    /// 20x12 grid with a stone floor from row 10 down
    fn floor_grid() -> TileGrid {
        let mut builder = GridBuilder::new(20, 12, TS).unwrap();
        builder.fill_rows(10, 12, TileKind::Stone);
        builder.build()
    }

    #[test]
    fn test_no_overlap_no_offset() {
        let grid = floor_grid();
        let rect = Rect::new(100.0, 100.0, 24.0, 51.2);
        let res = resolve_in_place(&grid, rect);
        assert_eq!(res, Resolution::default());
    }

    #[test]
    fn test_degenerate_rect_yields_zero() {
        let grid = floor_grid();
        for rect in [
            Rect::new(100.0, 310.0, 0.0, 20.0),
            Rect::new(100.0, 310.0, 20.0, 0.0),
            Rect::new(100.0, 310.0, -5.0, 20.0),
            Rect::new(f32::NAN, 310.0, 20.0, 20.0),
        ] {
            assert_eq!(resolve_in_place(&grid, rect), Resolution::default());
        }
    }

    #[test]
    fn test_landing_pushes_up_and_grounds() {
        let grid = floor_grid();
        // Floor top at y = 320; feet start 2px above it and fall 6px
        let h = 51.2;
        let pre_y = 320.0 - h - 2.0;
        let rect = Rect::new(100.0, pre_y + 6.0, 24.0, h);
        let res = resolve(&grid, rect, pre_y);
        assert!(res.on_ground);
        assert_eq!(res.offset.x, 0.0);
        assert!((res.offset.y + 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_resting_on_floor_is_not_a_side_hit() {
        let grid = floor_grid();
        let h = 51.2;
        // Already touching the floor, sinks 0.4px from gravity
        let pre_y = 320.0 - h;
        let rect = Rect::new(100.0, pre_y + 0.4, 24.0, h);
        let res = resolve(&grid, rect, pre_y);
        assert_eq!(res.offset.x, 0.0);
        assert!(res.on_ground);
    }

    #[test]
    fn test_ceiling_pushes_down_without_ground() {
        let mut builder = GridBuilder::new(10, 10, TS).unwrap();
        builder.fill_rows(0, 2, TileKind::Stone);
        let grid = builder.build();
        // Head 5px into the ceiling at y = 64
        let rect = Rect::new(100.0, 59.0, 24.0, 40.0);
        let res = resolve(&grid, rect, 70.0);
        assert!(!res.on_ground);
        assert!((res.offset.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_wall_push_is_horizontal() {
        let mut builder = GridBuilder::new(10, 10, TS).unwrap();
        builder.fill_rect(5, 0, 5, 9, TileKind::Stone);
        let grid = builder.build();
        // Right edge 3px into the wall at x = 160
        let rect = Rect::new(160.0 - 24.0 + 3.0, 100.0, 24.0, 40.0);
        let res = resolve_in_place(&grid, rect);
        assert!((res.offset.x + 3.0).abs() < 1e-3);
        assert_eq!(res.offset.y, 0.0);
        assert!(!res.on_ground);
    }

    #[test]
    fn test_water_and_leaves_are_passable() {
        let mut builder = GridBuilder::new(10, 10, TS).unwrap();
        builder.fill_rows(4, 6, TileKind::Water);
        builder.fill_rows(6, 8, TileKind::Leaf);
        let grid = builder.build();
        let rect = Rect::new(100.0, 130.0, 24.0, 100.0);
        assert_eq!(resolve_in_place(&grid, rect), Resolution::default());
        assert!(!rect.overlaps_solid(&grid));
    }

    #[test]
    fn test_world_edges_are_solid() {
        let grid = GridBuilder::new(4, 4, TS).unwrap().build();
        // Poking 5px out of the left edge
        let rect = Rect::new(-5.0, 40.0, 20.0, 20.0);
        let res = resolve_in_place(&grid, rect);
        assert!((res.offset.x - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_tunneling_through_thin_wall() {
        let mut builder = GridBuilder::new(20, 10, TS).unwrap();
        builder.fill_rect(10, 0, 10, 9, TileKind::Stone);
        let grid = builder.build();
        let wall_left = 10.0 * TS;
        let step = 12.0;

        let mut rect = Rect::new(wall_left - 24.0 - 50.0, 100.0, 24.0, 40.0);
        for _ in 0..20 {
            let moved = rect.translated(Vec2::new(step, 0.0));
            let res = resolve(&grid, moved, rect.pos.y);
            rect = moved.translated(res.offset);
            assert!(rect.max().x <= wall_left + CONTACT_EPSILON);
        }
        // Ends flush against the wall
        assert!((rect.max().x - wall_left).abs() < 1e-3);
    }

    /// 8x8 grid from a solidity mask, with every tile under `keep_clear` left open
    fn random_grid(cells: &[bool], keep_clear: Rect) -> TileGrid {
        let mut builder = GridBuilder::new(8, 8, TS).unwrap();
        for (i, &solid) in cells.iter().enumerate() {
            let (tx, ty) = (i as i32 % 8, i as i32 / 8);
            if solid && !overlaps(keep_clear.pos, keep_clear.size, tile_rect(tx, ty, TS)) {
                builder.set(tx, ty, TileKind::Dirt);
            }
        }
        builder.build()
    }

    proptest! {
        /// A free rectangle moved by at most the step cap never ends inside a solid tile
        #[test]
        fn prop_resolution_leaves_no_overlap(
            cells in prop::collection::vec(prop::bool::weighted(0.4), 64),
            x in 0.0f32..226.0,
            y in 0.0f32..200.0,
            w in 4.0f32..30.0,
            h in 4.0f32..56.0,
            dx in -12.0f32..12.0,
            dy in -12.0f32..12.0,
        ) {
            let start = Rect::new(x, y, w, h);
            let grid = random_grid(&cells, start);
            prop_assert!(!start.overlaps_solid(&grid));

            let moved = start.translated(Vec2::new(dx, dy));
            let res = resolve(&grid, moved, start.pos.y);
            let end = moved.translated(res.offset);
            prop_assert!(
                !end.overlaps_solid(&grid),
                "start {:?} moved {:?} end {:?}",
                start,
                moved,
                end
            );
        }
    }
}
