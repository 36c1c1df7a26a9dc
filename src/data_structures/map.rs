//! Maps and their tile layers.
//!
//! A [`Map`] is fixed-size tile grid metadata owning an ordered set of named
//! [`Layer`]s and, in lockstep, a [`Mesh`] with one sub-mesh per layer.
//! Layers and sub-meshes are stored by insertion index with a `name → index`
//! lookup on the side, so all access is root-down and no back-pointers are
//! needed.
//!
//! Row order: layer storage row 0 is the *bottom* edge of the rendered map.
//! [`Layer::tile`] reads storage order directly; the mesh rebuild routines in
//! [`crate::data_structures::world`] apply the `height - y - 1` flip exactly
//! once when computing buffer offsets. This keeps stored grids readable in
//! "row 0 = first JSON array row" order while matching the bottom-left
//! origin of GL-style clip space.

use std::collections::HashMap;

use crate::data_structures::mesh::{Mesh, SubMesh};
use crate::error::SceneError;

/// Reserved tile value for an empty cell. Any negative index is treated as
/// empty by the UV mapper; `-1` is the documented convention.
pub const EMPTY_TILE: i32 = -1;

/// One named layer of a map: a `[height][width]` grid of tile indices plus a
/// Z-order value.
#[derive(Clone, Debug)]
pub struct Layer {
    pub z: f32,
    pub data: Vec<Vec<i32>>,
}

impl Layer {
    /// Read a cell in storage order (no row flip).
    pub fn tile(&self, x: usize, y: usize) -> i32 {
        self.data[y][x]
    }
}

/// Fixed-size tile grid with named layers and their mesh payloads.
///
/// Created via [`crate::data_structures::world::World::add_map`]; never
/// resized afterwards. The position vertex buffer is filled at creation time
/// and stays untouched by all layer operations.
#[derive(Clone, Debug)]
pub struct Map {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Tile size in pixels; vertex positions are scaled by it so world units
    /// are pixels.
    pub tile_width: u32,
    pub tile_height: u32,

    pub(crate) layers: Vec<Layer>,
    pub(crate) layer_index: HashMap<String, usize>,
    pub mesh: Mesh,
}

impl Map {
    pub(crate) fn new(
        name: &str,
        width: usize,
        height: usize,
        tile_width: u32,
        tile_height: u32,
    ) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidMapSize { width, height });
        }
        let mut map = Self {
            name: name.to_string(),
            width,
            height,
            tile_width,
            tile_height,
            layers: Vec::new(),
            layer_index: HashMap::new(),
            mesh: Mesh::new(width * height * 6),
        };
        map.build_vertices();
        Ok(map)
    }

    /// Number of cells in the grid.
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Six vertices per tile. Vertices could be shared between tiles but a
    /// flat layout keeps upload and per-cell rewrites trivial.
    pub fn vertices_needed(&self) -> usize {
        self.cells() * 6
    }

    /// Map center in world (pixel) coordinates.
    pub fn center(&self) -> (f32, f32) {
        (
            self.width as f32 / 2.0 * self.tile_width as f32,
            self.height as f32 / 2.0 * self.tile_height as f32,
        )
    }

    /// Append a zero-filled layer and its sub-mesh at depth `z`.
    pub(crate) fn add_layer(&mut self, name: &str, z: f32) -> Result<usize, SceneError> {
        if self.layer_index.contains_key(name) {
            return Err(SceneError::LayerExists {
                map: self.name.clone(),
                layer: name.to_string(),
            });
        }
        let index = self.layers.len();
        self.layers.push(Layer {
            z,
            data: vec![vec![0; self.width]; self.height],
        });
        self.mesh
            .submeshes
            .push(SubMesh::new(z, self.vertices_needed()));
        self.layer_index.insert(name.to_string(), index);
        Ok(index)
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layer_index.get(name).map(|&i| &self.layers[i])
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layer_position(&self, name: &str) -> Result<usize, SceneError> {
        self.layer_index
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::LayerNotFound {
                map: self.name.clone(),
                layer: name.to_string(),
            })
    }

    /// Sub-mesh of a named layer, in insertion order.
    pub fn submesh(&self, name: &str) -> Option<&SubMesh> {
        self.layer_index
            .get(name)
            .map(|&i| &self.mesh.submeshes[i])
    }

    /// Fill the shared position buffer: two CCW triangles per cell, scaled by
    /// the tile pixel size, z = 0 (layer depth lives in the sub-mesh model
    /// transform).
    fn build_vertices(&mut self) {
        let tw = self.tile_width as f32;
        let th = self.tile_height as f32;
        for y in 0..self.height {
            for x in 0..self.width {
                let i = (y * self.width + x) * 6;
                let (x0, y0) = (x as f32 * tw, y as f32 * th);
                let (x1, y1) = (x0 + tw, y0 + th);

                // first triangle
                //    2
                //  / |
                // 0--1
                self.mesh.vertices.set(i, x0, y0, 0.0);
                self.mesh.vertices.set(i + 1, x1, y0, 0.0);
                self.mesh.vertices.set(i + 2, x1, y1, 0.0);
                // second triangle
                // 4--3
                // | /
                // 5
                self.mesh.vertices.set(i + 3, x1, y1, 0.0);
                self.mesh.vertices.set(i + 4, x0, y1, 0.0);
                self.mesh.vertices.set(i + 5, x0, y0, 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sized_maps() {
        assert!(matches!(
            Map::new("m", 0, 3, 16, 16),
            Err(SceneError::InvalidMapSize { .. })
        ));
    }

    #[test]
    fn vertex_buffer_is_sized_and_scaled() {
        let map = Map::new("m", 4, 3, 16, 8).unwrap();
        assert_eq!(map.mesh.vertices.as_slice().len(), 4 * 3 * 6 * 3);
        // Cell (1, 2) starts at vertex (16, 16) and spans one tile.
        let i = (2 * 4 + 1) * 6;
        assert_eq!(map.mesh.vertices.at(i), (16.0, 16.0, 0.0));
        assert_eq!(map.mesh.vertices.at(i + 2), (32.0, 24.0, 0.0));
    }

    #[test]
    fn layers_keep_insertion_order() {
        let mut map = Map::new("m", 2, 2, 16, 16).unwrap();
        assert_eq!(map.add_layer("bg", 0.0).unwrap(), 0);
        assert_eq!(map.add_layer("fg", 1.0).unwrap(), 1);
        assert!(matches!(
            map.add_layer("bg", 2.0),
            Err(SceneError::LayerExists { .. })
        ));
        assert_eq!(map.layer_position("fg").unwrap(), 1);
        assert_eq!(map.mesh.submeshes.len(), 2);
        assert_eq!(map.layer("bg").unwrap().tile(1, 1), 0);
    }
}
