//! The render driver contract and screen/color primitives.
//!
//! The engine never talks to a graphics API directly. Each frame it hands a
//! [`RenderDriver`] implementation the data it needs: vertex and UV buffers,
//! model/view/projection matrices, the bound texture and the clear color.
//! Shader compilation, buffer objects, framebuffers and draw submission are
//! entirely the driver's business.
//!
//! # Key types
//!
//! - [`RenderDriver`] is the trait the embedding renderer implements
//! - [`TextureId`] is the opaque handle a driver assigns to uploaded pixels
//! - [`Color`] is a normalized RGBA color with `#rrggbb` parsing
//! - [`Screen`] is the current viewport size and pixel ratio
//!

use cgmath::Matrix4;

/// Opaque driver-assigned texture handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureId(pub u32);

/// Normalized RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Fallback for malformed hex input: loud magenta.
    pub const MAGENTA: Color = Color {
        r: 1.0,
        g: 0.0,
        b: 1.0,
        a: 1.0,
    };

    /// Parse a `#rrggbb` string into a fully opaque color.
    ///
    /// Malformed input yields [`Color::MAGENTA`] instead of an error so a
    /// bad host value is visible on screen rather than fatal.
    pub fn from_hex(hex: &str) -> Color {
        let digits = match hex.strip_prefix('#') {
            Some(d) if d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()) => d,
            _ => return Color::MAGENTA,
        };
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) as f32 / 255.0
        };
        Color {
            r: channel(0),
            g: channel(2),
            b: channel(4),
            a: 1.0,
        }
    }
}

/// Current viewport in physical pixels.
///
/// Hosts report resizes in logical (CSS-style) pixels; [`Screen::resize`]
/// scales them by the device pixel ratio so the stored dimensions always
/// match the physical framebuffer.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Resize from logical dimensions, scaled by the device pixel ratio and
    /// rounded to whole pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = (width as f32 * self.device_pixel_ratio).round() as u32;
        self.height = (height as f32 * self.device_pixel_ratio).round() as u32;
    }
}

/// Contract between the scene engine and the embedding renderer.
///
/// Called by [`crate::flow::SceneFlow`] once per tick, strictly in this
/// order: `set_viewport`, `clear`, optionally `bind_texture`, then per map
/// `upload_vertices` followed by `set_matrices` + `upload_uv` +
/// `draw_triangles` per layer. Buffer slices are only valid for the duration
/// of the call; a driver that uploads asynchronously must copy.
pub trait RenderDriver {
    fn set_viewport(&mut self, width: u32, height: u32);

    fn clear(&mut self, color: Color);

    /// Upload decoded RGBA pixels and return an opaque handle for later
    /// binding. Called outside the draw pass, when a tileset arrives.
    fn upload_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> TextureId;

    fn bind_texture(&mut self, texture: TextureId);

    /// Set the matrices for the next draw call.
    fn set_matrices(&mut self, model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>);

    /// Upload the shared position buffer of the map being drawn.
    fn upload_vertices(&mut self, data: &[f32]);

    /// Upload the UV buffer of the layer being drawn.
    fn upload_uv(&mut self, data: &[f32]);

    fn draw_triangles(&mut self, vertex_count: usize);
}
