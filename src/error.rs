//! Scene error kinds.
//!
//! Every fallible scene mutation returns a [`SceneError`]. Per-command
//! failures are caught and logged at the dispatch boundary in
//! [`crate::flow`]; they never halt the frame loop. A missing tileset is
//! deliberately *not* an error: UV lookups recover locally with the
//! full-texture placeholder rectangle.

use thiserror::Error;

/// Errors produced by scene mutations and command decoding.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A command referenced a map that was never added.
    #[error("map not found: {0}")]
    MapNotFound(String),

    /// A command referenced a layer that was never added to its map.
    #[error("layer not found: {layer} (map {map})")]
    LayerNotFound { map: String, layer: String },

    /// `AddMap` was issued with a name that is already registered.
    #[error("map already exists: {0}")]
    MapExists(String),

    /// `AddLayer` was issued with a name that is already taken on that map.
    #[error("layer already exists: {layer} (map {map})")]
    LayerExists { map: String, layer: String },

    /// Map dimensions must be positive.
    #[error("invalid map size: {width}x{height}")]
    InvalidMapSize { width: usize, height: usize },

    /// A layer-data grid does not match its map's dimensions.
    #[error("layer data is {actual_width}x{actual_height}, map is {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// `SetTile` addressed a cell outside the map grid.
    #[error("tile ({x}, {y}) is outside the map grid")]
    TileOutOfBounds { x: usize, y: usize },

    /// The tileset image could not be decoded; the world keeps its prior
    /// tileset, if any.
    #[error("failed to decode tileset image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The host sent an unknown command tag or a malformed payload.
    #[error("cannot decode command `{kind}`: {source}")]
    CommandDecode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}
