#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Once;

use gridflow::render::{Color, RenderDriver, TextureId};

static LOGGER: Once = Once::new();

pub fn init_logs() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// A render driver that records every call instead of drawing.
///
/// Counters let tests assert how often the engine touched the driver; the
/// captured buffers let them assert what would have been uploaded.
pub struct RecordingDriver {
    pub viewport: (u32, u32),
    pub clears: usize,
    pub last_clear: Option<Color>,
    pub textures_uploaded: usize,
    pub bound_texture: Option<TextureId>,
    pub vertex_uploads: usize,
    pub uv_uploads: usize,
    pub last_uv: Vec<f32>,
    pub draw_calls: usize,
    pub last_draw_vertices: usize,
    next_texture: u32,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self {
            viewport: (0, 0),
            clears: 0,
            last_clear: None,
            textures_uploaded: 0,
            bound_texture: None,
            vertex_uploads: 0,
            uv_uploads: 0,
            last_uv: Vec::new(),
            draw_calls: 0,
            last_draw_vertices: 0,
            next_texture: 1,
        }
    }
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderDriver for RecordingDriver {
    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn clear(&mut self, color: Color) {
        self.clears += 1;
        self.last_clear = Some(color);
    }

    fn upload_texture(&mut self, _width: u32, _height: u32, _pixels: &[u8]) -> TextureId {
        self.textures_uploaded += 1;
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        id
    }

    fn bind_texture(&mut self, texture: TextureId) {
        self.bound_texture = Some(texture);
    }

    fn set_matrices(
        &mut self,
        _model: gridflow::Matrix4<f32>,
        _view: gridflow::Matrix4<f32>,
        _projection: gridflow::Matrix4<f32>,
    ) {
    }

    fn upload_vertices(&mut self, _data: &[f32]) {
        self.vertex_uploads += 1;
    }

    fn upload_uv(&mut self, data: &[f32]) {
        self.uv_uploads += 1;
        self.last_uv = data.to_vec();
    }

    fn draw_triangles(&mut self, vertex_count: usize) {
        self.draw_calls += 1;
        self.last_draw_vertices = vertex_count;
    }
}

/// A `[height][width]` grid filled with one tile index.
pub fn grid(width: usize, height: usize, tile: i32) -> Vec<Vec<i32>> {
    vec![vec![tile; width]; height]
}

/// Encode a solid-color RGBA image as PNG bytes, for `LoadTileset` payloads.
pub fn png_atlas(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([80, 120, 160, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("png encoding");
    buf.into_inner()
}
