//! gridflow
//!
//! A lightweight 2D tile scene engine. gridflow maintains a collection of
//! named maps composed of tile layers, converts that logical grid into
//! GPU-ready vertex/UV geometry, and keeps the two in sync as tiles are
//! mutated. A small typed command protocol lets a host environment drive the
//! scene (add maps and layers, paint tiles, move and zoom the camera, load a
//! tileset atlas, resize the viewport) without touching engine internals
//! directly. The graphics API itself stays external: the engine only talks to
//! a [`render::RenderDriver`] that knows how to upload buffers and draw.
//!
//! High-level modules
//! - `camera`: 2D camera with view/projection matrix derivation
//! - `commands`: typed commands decoded from the host plus the rate-limited
//!   command queue
//! - `data_structures`: scene data models (world, maps, layers, meshes,
//!   tilesets, tile animations)
//! - `error`: scene error kinds
//! - `flow`: high level flow control (the per-frame tick: drain one command,
//!   synchronize meshes, draw)
//! - `render`: the driver contract consumed each frame, plus screen and
//!   color primitives
//! - `resources`: shared tileset image/texture registry
//!

pub mod camera;
pub mod commands;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod render;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use error::SceneError;
