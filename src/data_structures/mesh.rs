//! Mesh primitives: flat vertex/UV buffers, sub-meshes and the quad layout.
//!
//! Buffers are plain `Vec<f32>` containers addressed by *logical element
//! index* (a vertex for the 3f buffer, a UV pair for the 2f buffer), fully
//! decoupled from any GPU handle. Every tile cell occupies six consecutive
//! vertices (two CCW triangles, no shared vertices): `width * height * 6`
//! elements per buffer regardless of how many tiles are visible. That trades
//! memory for a trivially uploadable layout.

use cgmath::Matrix4;

use crate::data_structures::tileset::UvRect;

/// Flat buffer of `(x, y, z)` vertex positions.
#[derive(Clone, Debug)]
pub struct VertexBuffer3f {
    data: Vec<f32>,
}

impl VertexBuffer3f {
    /// Allocate a zeroed buffer holding `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            data: vec![0.0; n * 3],
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.data.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn at(&self, i: usize) -> (f32, f32, f32) {
        let i = i * 3;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }

    pub fn set(&mut self, i: usize, x: f32, y: f32, z: f32) {
        let i = i * 3;
        self.data[i] = x;
        self.data[i + 1] = y;
        self.data[i + 2] = z;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw byte view for driver upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Flat buffer of `(u, v)` texture coordinates.
#[derive(Clone, Debug)]
pub struct VertexBuffer2f {
    data: Vec<f32>,
}

impl VertexBuffer2f {
    /// Allocate a zeroed buffer holding `n` UV pairs.
    pub fn new(n: usize) -> Self {
        Self {
            data: vec![0.0; n * 2],
        }
    }

    /// Number of UV pairs.
    pub fn len(&self) -> usize {
        self.data.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn at(&self, i: usize) -> (f32, f32) {
        let i = i * 2;
        (self.data[i], self.data[i + 1])
    }

    pub fn set(&mut self, i: usize, u: f32, v: f32) {
        let i = i * 2;
        self.data[i] = u;
        self.data[i + 1] = v;
    }

    /// Write the six UV pairs of one tile cell.
    ///
    /// `cell` is the cell index in buffer order; the six vertices follow the
    /// same triangle order as the position quad, with the V axis flipped so
    /// that storage row 0 ends up at the bottom of the rendered map:
    ///
    /// ```text
    ///    2      4--3
    ///  / |  +   | /
    /// 0--1      5
    /// ```
    pub fn set_quad(&mut self, cell: usize, uv: UvRect) {
        let i = cell * 6;

        self.set(i, uv.u0, uv.v1);
        self.set(i + 1, uv.u1, uv.v1);
        self.set(i + 2, uv.u1, uv.v0);

        self.set(i + 3, uv.u1, uv.v0);
        self.set(i + 4, uv.u0, uv.v0);
        self.set(i + 5, uv.u0, uv.v1);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw byte view for driver upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Per-layer geometry payload: the UV buffer plus a model transform.
///
/// Position geometry is shared per map, so a sub-mesh only carries what
/// differs between layers: which atlas cell each tile shows, and a Z
/// translation placing the layer in depth.
#[derive(Clone, Debug)]
pub struct SubMesh {
    pub model: Matrix4<f32>,
    pub uvs: VertexBuffer2f,
}

impl SubMesh {
    /// Create a sub-mesh for a layer at depth `z` with `n` zeroed UV pairs.
    pub fn new(z: f32, n: usize) -> Self {
        Self {
            model: Matrix4::from_translation(cgmath::Vector3::new(0.0, 0.0, z)),
            uvs: VertexBuffer2f::new(n),
        }
    }
}

/// Per-map mesh: one shared position buffer and one sub-mesh per layer.
///
/// The vertex buffer encodes the static quad-grid geometry of the map and is
/// computed once at map creation; only the UV buffers change afterwards.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub vertices: VertexBuffer3f,
    pub submeshes: Vec<SubMesh>,
}

impl Mesh {
    pub fn new(n: usize) -> Self {
        Self {
            vertices: VertexBuffer3f::new(n),
            submeshes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_report_logical_lengths() {
        let vb = VertexBuffer3f::new(6);
        assert_eq!(vb.len(), 6);
        assert_eq!(vb.as_slice().len(), 18);

        let uv = VertexBuffer2f::new(6);
        assert_eq!(uv.len(), 6);
        assert_eq!(uv.as_slice().len(), 12);
    }

    #[test]
    fn set_quad_writes_two_flipped_triangles() {
        let rect = UvRect {
            u0: 0.25,
            v0: 0.5,
            u1: 0.75,
            v1: 1.0,
        };
        let mut uv = VertexBuffer2f::new(12);
        uv.set_quad(1, rect);

        // Cell 0 untouched.
        assert_eq!(uv.at(0), (0.0, 0.0));
        // Cell 1: (u0,v1) (u1,v1) (u1,v0) (u1,v0) (u0,v0) (u0,v1).
        assert_eq!(uv.at(6), (0.25, 1.0));
        assert_eq!(uv.at(7), (0.75, 1.0));
        assert_eq!(uv.at(8), (0.75, 0.5));
        assert_eq!(uv.at(9), (0.75, 0.5));
        assert_eq!(uv.at(10), (0.25, 0.5));
        assert_eq!(uv.at(11), (0.25, 1.0));
    }

    #[test]
    fn byte_view_matches_element_count() {
        let vb = VertexBuffer3f::new(4);
        assert_eq!(vb.as_bytes().len(), 4 * 3 * 4);
    }
}
