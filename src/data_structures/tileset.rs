//! Tileset atlas metadata and tile-index → UV math.
//!
//! A tileset is a single texture image subdivided into a regular grid of
//! fixed-size tiles, addressed by a flat tile index counting left-to-right,
//! top-to-bottom. [`Tileset::texture_uv`] maps such an index to the
//! normalized texture rectangle of its atlas cell.

/// A normalized texture-coordinate rectangle.
///
/// `(u0, v0)` is the top-left corner of the atlas cell, `(u1, v1)` the
/// bottom-right, both in `[0, 1]` texture space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    /// The whole texture. Used as a safe placeholder whenever no tileset is
    /// bound yet, so callers can render solid quads without crashing.
    pub const FULL: UvRect = UvRect {
        u0: 0.0,
        v0: 0.0,
        u1: 1.0,
        v1: 1.0,
    };

    /// A degenerate zero-area rectangle, assigned to empty cells.
    pub const ZERO: UvRect = UvRect {
        u0: 0.0,
        v0: 0.0,
        u1: 0.0,
        v1: 0.0,
    };
}

/// Metadata of the active tileset atlas.
///
/// Only the pixel dimensions matter for UV derivation; the decoded pixels and
/// the GPU texture handle live in [`crate::resources::Resources`]. Replaced
/// wholesale when the host reloads the tileset, never partially updated.
#[derive(Clone, Debug)]
pub struct Tileset {
    pub name: String,
    /// Atlas width in pixels. Must be an exact multiple of the tile width
    /// used by the maps rendering from it.
    pub width: u32,
    /// Atlas height in pixels.
    pub height: u32,
}

impl Tileset {
    /// Compute the UV rectangle of `tile` for a `tile_width` x `tile_height`
    /// cell grid over this atlas.
    ///
    /// Negative indices are the reserved "empty" value (`-1` by convention)
    /// and map to [`UvRect::ZERO`]. Non-negative indices are not bounds
    /// checked: an index past the last atlas cell silently wraps into the
    /// following row, matching what the raw arithmetic produces.
    pub fn texture_uv(&self, tile: i32, tile_width: u32, tile_height: u32) -> UvRect {
        if tile < 0 {
            return UvRect::ZERO;
        }
        let tiles_per_row = (self.width / tile_width) as u64;
        if tiles_per_row == 0 {
            // Tile wider than the atlas; nothing sensible to address.
            return UvRect::FULL;
        }
        // Widened so even absurd host-supplied indices stay finite instead
        // of overflowing the cell arithmetic.
        let col = tile as u64 % tiles_per_row;
        let row = tile as u64 / tiles_per_row;
        let w = self.width as f32;
        let h = self.height as f32;

        UvRect {
            u0: (col * tile_width as u64) as f32 / w,
            v0: (row * tile_height as u64) as f32 / h,
            u1: ((col + 1) * tile_width as u64) as f32 / w,
            v1: ((row + 1) * tile_height as u64) as f32 / h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas() -> Tileset {
        Tileset {
            name: "tileset".to_string(),
            width: 64,
            height: 32,
        }
    }

    #[test]
    fn tile_zero_is_the_first_cell() {
        let uv = atlas().texture_uv(0, 16, 16);
        assert_eq!(
            uv,
            UvRect {
                u0: 0.0,
                v0: 0.0,
                u1: 16.0 / 64.0,
                v1: 16.0 / 32.0,
            }
        );
    }

    #[test]
    fn rects_are_never_degenerate_for_valid_indices() {
        let ts = atlas();
        for tile in 0..8 {
            let uv = ts.texture_uv(tile, 16, 16);
            assert!(uv.u0 < uv.u1, "tile {tile}: u0 {} !< u1 {}", uv.u0, uv.u1);
            assert!(uv.v0 < uv.v1, "tile {tile}: v0 {} !< v1 {}", uv.v0, uv.v1);
        }
    }

    #[test]
    fn index_wraps_rows_left_to_right() {
        // 4 tiles per row; tile 5 is row 1, col 1.
        let uv = atlas().texture_uv(5, 16, 16);
        assert_eq!(uv.u0, 16.0 / 64.0);
        assert_eq!(uv.v0, 16.0 / 32.0);
    }

    #[test]
    fn huge_indices_alias_without_panicking() {
        // Out-of-range indices alias past the atlas rather than aborting.
        let uv = atlas().texture_uv(i32::MAX, 16, 16);
        assert!(uv.u0.is_finite() && uv.v0.is_finite());
        assert!(uv.u1.is_finite() && uv.v1.is_finite());
        assert!(uv.u0 < uv.u1);
        // The row coordinate loses precision at this magnitude; it must
        // still be ordered.
        assert!(uv.v0 <= uv.v1);
    }

    #[test]
    fn negative_tile_is_empty() {
        assert_eq!(atlas().texture_uv(-1, 16, 16), UvRect::ZERO);
    }
}
