/**
 * This module contains the shared scene resources: the decoded tileset
 * image, the atlas metadata derived from it, and the opaque GPU texture
 * handle assigned by the render driver.
 */
use image::RgbaImage;

use crate::data_structures::tileset::{Tileset, UvRect};
use crate::error::SceneError;
use crate::render::TextureId;

/// Shared tileset/texture registry of the world.
///
/// All three fields start empty; a successful `resources.LoadTileset`
/// command fills the image and tileset in one step and the driver-assigned
/// texture handle right after. A reload replaces everything wholesale, there
/// is no partial update.
#[derive(Debug, Default)]
pub struct Resources {
    pub tileset: Option<Tileset>,
    pub image: Option<RgbaImage>,
    pub texture: Option<TextureId>,
}

impl Resources {
    /// Decode a tileset atlas from encoded image bytes (PNG and friends) and
    /// bind it as the active tileset.
    ///
    /// On decode failure the previous tileset, if any, stays bound.
    pub fn load_tileset(&mut self, data: &[u8]) -> Result<&RgbaImage, SceneError> {
        let img = image::load_from_memory(data)?.to_rgba8();
        self.tileset = Some(Tileset {
            name: "tileset".to_string(),
            width: img.width(),
            height: img.height(),
        });
        log::info!("tileset loaded: {}x{}", img.width(), img.height());
        Ok(self.image.insert(img))
    }

    pub fn has_tileset(&self) -> bool {
        self.tileset.is_some()
    }

    /// UV rectangle of `tile` under the active tileset, or the full-texture
    /// placeholder when none is bound yet. Never fails: callers can always
    /// render solid quads while the atlas image is still in flight.
    pub fn texture_uv(&self, tile: i32, tile_width: u32, tile_height: u32) -> UvRect {
        match &self.tileset {
            Some(tileset) => tileset.texture_uv(tile, tile_width, tile_height),
            None => UvRect::FULL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tileset_yields_full_rectangle() {
        let resources = Resources::default();
        assert_eq!(resources.texture_uv(7, 16, 16), UvRect::FULL);
    }

    #[test]
    fn decode_failure_keeps_prior_state() {
        let mut resources = Resources::default();
        assert!(resources.load_tileset(b"not an image").is_err());
        assert!(!resources.has_tileset());
    }
}
