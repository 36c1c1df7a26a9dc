//! The world aggregate and the mesh synchronization state machine.
//!
//! [`World`] is the root of the scene: a registry of named maps plus the
//! shared tileset resources, with an explicit [`SyncState`] tracking whether
//! every sub-mesh UV buffer reflects its layer's tile grid. Layer data may
//! arrive from the host before the tileset image finished loading; rather
//! than blocking, the world accepts the data, goes `Dirty`, and performs a
//! full rebuild on the next [`World::sync`] once resources are in place.

use std::collections::HashMap;

use crate::data_structures::map::Map;
use crate::error::SceneError;
use crate::resources::Resources;

/// Consistency between tile grids and UV buffers.
///
/// `Synced` guarantees every sub-mesh UV buffer equals the UV-mapper output
/// for its layer's current grid under the current tileset. Any write that
/// can invalidate that guarantee transitions to `Dirty`; only an explicit
/// [`World::sync`] transitions back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    Synced,
    Dirty,
}

/// The aggregate root of the scene.
#[derive(Debug, Default)]
pub struct World {
    maps: HashMap<String, Map>,
    pub resources: Resources,
    sync_state: SyncState,
}

impl Default for SyncState {
    // A fresh world has nothing synchronized yet.
    fn default() -> Self {
        SyncState::Dirty
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync_state
    }

    pub fn is_synced(&self) -> bool {
        self.sync_state == SyncState::Synced
    }

    pub fn map(&self, name: &str) -> Option<&Map> {
        self.maps.get(name)
    }

    pub fn maps(&self) -> impl Iterator<Item = &Map> {
        self.maps.values()
    }

    /// Register a new fixed-size map and build its static position geometry.
    ///
    /// The vertex buffer is computed here, once; later layer operations only
    /// ever touch UV buffers. Duplicate names are rejected: silently
    /// replacing a map would orphan its sub-meshes mid-frame.
    pub fn add_map(
        &mut self,
        name: &str,
        width: usize,
        height: usize,
        tile_width: u32,
        tile_height: u32,
    ) -> Result<&mut Map, SceneError> {
        if self.maps.contains_key(name) {
            return Err(SceneError::MapExists(name.to_string()));
        }
        let map = Map::new(name, width, height, tile_width, tile_height)?;
        log::info!("map added: {name} ({width}x{height}, tiles {tile_width}x{tile_height})");
        self.sync_state = SyncState::Dirty;
        Ok(self.maps.entry(name.to_string()).or_insert(map))
    }

    /// Append a zero-filled layer (and its sub-mesh) to a map.
    ///
    /// The UV buffer starts all-zero until the next sync pass, so a
    /// structural add always dirties the world even when a tileset is
    /// already bound.
    pub fn add_layer(&mut self, map: &str, name: &str, z: f32) -> Result<(), SceneError> {
        let m = self
            .maps
            .get_mut(map)
            .ok_or_else(|| SceneError::MapNotFound(map.to_string()))?;
        m.add_layer(name, z)?;
        log::info!("layer added: {name} (map {map}, z {z})");
        self.sync_state = SyncState::Dirty;
        Ok(())
    }

    /// Bulk-replace a layer's tile grid.
    ///
    /// The grid must match the map dimensions exactly. While the world is
    /// synced *and* a tileset is bound, the layer's UV buffer is rebuilt
    /// immediately; otherwise the rebuild is deferred to [`World::sync`]
    /// (a tileset-dependent write without a bound tileset always forces
    /// `Dirty` instead of silently baking placeholder UVs).
    pub fn add_layer_data(
        &mut self,
        map: &str,
        layer: &str,
        data: Vec<Vec<i32>>,
    ) -> Result<(), SceneError> {
        let m = self
            .maps
            .get_mut(map)
            .ok_or_else(|| SceneError::MapNotFound(map.to_string()))?;
        let index = m.layer_position(layer)?;

        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if rows != m.height || data.iter().any(|row| row.len() != m.width) {
            return Err(SceneError::DimensionMismatch {
                expected_width: m.width,
                expected_height: m.height,
                actual_width: cols,
                actual_height: rows,
            });
        }
        m.layers[index].data = data;

        if self.sync_state == SyncState::Synced && self.resources.has_tileset() {
            rebuild_layer(m, index, &self.resources);
        } else {
            self.sync_state = SyncState::Dirty;
        }
        Ok(())
    }

    /// Write one cell and immediately rewrite its six UV pairs.
    ///
    /// Not gated by the sync state: a single-cell rewrite is O(1) and the
    /// call is expected after a tileset exists. If none is bound yet the
    /// placeholder rectangle is written and the world goes `Dirty` so the
    /// real UVs land on the next sync after loading.
    pub fn set_tile(
        &mut self,
        map: &str,
        layer: &str,
        x: usize,
        y: usize,
        tile: i32,
    ) -> Result<(), SceneError> {
        let m = self
            .maps
            .get_mut(map)
            .ok_or_else(|| SceneError::MapNotFound(map.to_string()))?;
        let index = m.layer_position(layer)?;
        if x >= m.width || y >= m.height {
            return Err(SceneError::TileOutOfBounds { x, y });
        }
        m.layers[index].data[y][x] = tile;

        // Storage row 0 is the bottom edge: flip once here.
        let cell = (m.height - y - 1) * m.width + x;
        let uv = self
            .resources
            .texture_uv(tile, m.tile_width, m.tile_height);
        m.mesh.submeshes[index].uvs.set_quad(cell, uv);

        if !self.resources.has_tileset() {
            self.sync_state = SyncState::Dirty;
        }
        Ok(())
    }

    /// Mark every UV buffer stale. Called whenever a tileset is (re)loaded,
    /// since earlier layer writes may have been skipped or baked against the
    /// placeholder rectangle.
    pub fn resync(&mut self) {
        self.sync_state = SyncState::Dirty;
    }

    /// Rebuild every stale UV buffer from the tile grids.
    ///
    /// No-op when already synced. Returns the number of cells written, which
    /// is zero exactly in the no-op case; callers can use it as a write
    /// counter.
    pub fn sync(&mut self) -> usize {
        if self.sync_state == SyncState::Synced {
            return 0;
        }
        let mut written = 0;
        for m in self.maps.values_mut() {
            for index in 0..m.layers.len() {
                written += rebuild_layer(m, index, &self.resources);
            }
        }
        self.sync_state = SyncState::Synced;
        log::debug!("world synced, {written} cells rebuilt");
        written
    }
}

/// Recompute one layer's full UV buffer. Returns cells written.
fn rebuild_layer(map: &mut Map, index: usize, resources: &Resources) -> usize {
    let width = map.width;
    let height = map.height;
    let (tw, th) = (map.tile_width, map.tile_height);
    let layer = &map.layers[index];
    let submesh = &mut map.mesh.submeshes[index];

    for cy in 0..height {
        for cx in 0..width {
            // Buffer row cy shows storage row height - cy - 1.
            let tile = layer.tile(cx, height - cy - 1);
            let uv = resources.texture_uv(tile, tw, th);
            submesh.uvs.set_quad(cy * width + cx, uv);
        }
    }
    width * height
}
