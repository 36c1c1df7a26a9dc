//! 2D camera: position, zoom and view/projection matrix derivation.
//!
//! The camera stores the *negated* translation of the focus point, so moving
//! the focus right moves the scene left. Zoom is clamped to
//! [`Camera2D::ZOOM_MIN`]..[`Camera2D::ZOOM_MAX`] and carries a snap
//! correction: results within `0.1` of `1.5` collapse back to exactly `1.0`,
//! compensating a rendering seam when crossing the 0.5 → 1 zoom boundary.
//! Removing the snap is a visible behavior change.

use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::render::Screen;

/// Orthographic 2D camera.
#[derive(Clone, Debug)]
pub struct Camera2D {
    /// Negated focus translation; `z` is always 0.
    pub position: Vector3<f32>,
    pub zoom: f32,
    pub view: Matrix4<f32>,
}

impl Camera2D {
    pub const ZOOM_MIN: f32 = 0.5;
    pub const ZOOM_MAX: f32 = 20.0;
    const ZOOM_SNAP_CENTER: f32 = 1.5;
    const ZOOM_SNAP_BAND: f32 = 0.1;

    /// Camera at the origin with zoom 1.
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            zoom: 1.0,
            view: Matrix4::identity(),
        }
    }

    /// Focus the camera on world point `(x, y)` (absolute).
    pub fn translate(&mut self, x: f32, y: f32) {
        self.position = Vector3::new(-x, -y, 0.0);
        self.view = Matrix4::from_translation(self.position);
    }

    /// Move the focus point by `(dx, dy)` (relative).
    pub fn translate_by(&mut self, dx: f32, dy: f32) {
        self.position.x -= dx;
        self.position.y -= dy;
        self.view = Matrix4::from_translation(self.position);
    }

    /// Set the zoom factor, clamped to the valid range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    /// Adjust the zoom by `delta`, clamped, then snap-corrected: a result
    /// within the band around 1.5 lands on exactly 1.0.
    pub fn zoom_by(&mut self, delta: f32) {
        let mut zoom = (self.zoom + delta).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
        if (zoom - Self::ZOOM_SNAP_CENTER).abs() <= Self::ZOOM_SNAP_BAND {
            zoom = 1.0;
        }
        self.zoom = zoom;
    }

    /// Orthographic projection, symmetric around the origin.
    ///
    /// Half-extents are the viewport dimensions over `2 * zoom`; near/far sit
    /// at ±100, generous headroom so per-layer Z offsets never clip.
    pub fn projection(&self, screen: &Screen) -> Matrix4<f32> {
        let half_w = screen.width as f32 / (2.0 * self.zoom);
        let half_h = screen.height as f32 / (2.0 * self.zoom);
        cgmath::ortho(-half_w, half_w, -half_h, half_h, -100.0, 100.0)
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}
