//! Typed host commands and the per-frame command queue.
//!
//! The host environment drives the scene through string-tagged JSON events.
//! They are decoded exactly once, at the queue boundary, into the [`Command`]
//! sum type; everything downstream matches on variants instead of poking at
//! stringly-typed payload fields.
//!
//! The queue is a plain FIFO behind a reader/writer lock: any thread may
//! enqueue, while the single consumer (the render tick) removes **at most
//! one** command per tick. That deliberately rate-limits state mutation to
//! one command per frame so a burst of host events can never starve
//! rendering. Nothing is ever dropped; every enqueued command is eventually
//! applied.

use std::collections::VecDeque;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;

use crate::error::SceneError;

/// A decoded host command.
///
/// Tags and payload fields mirror the host protocol one to one; see
/// [`Command::decode`] for the envelope format.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    /// Decode the given image bytes, bind them as the active tileset and
    /// force a full mesh rebuild.
    #[serde(rename = "resources.LoadTileset")]
    LoadTileset { data: Vec<u8> },

    /// Set the clear color from a `#rrggbb` string.
    #[serde(rename = "world.SetBackground")]
    SetBackground { color: String },

    #[serde(rename = "world.AddMap", rename_all = "camelCase")]
    AddMap {
        name: String,
        width: usize,
        height: usize,
        tile_width: u32,
        tile_height: u32,
    },

    #[serde(rename = "world.AddLayer")]
    AddLayer { map: String, name: String, z: f32 },

    #[serde(rename = "world.AddLayerData")]
    AddLayerData {
        map: String,
        layer: String,
        data: Vec<Vec<i32>>,
    },

    #[serde(rename = "world.SetTile")]
    SetTile {
        map: String,
        layer: String,
        x: usize,
        y: usize,
        tile: i32,
    },

    #[serde(rename = "camera.Translate")]
    CameraTranslate { x: f32, y: f32 },

    #[serde(rename = "camera.TranslateBy")]
    CameraTranslateBy { x: f32, y: f32 },

    #[serde(rename = "camera.Zoom")]
    CameraZoom { zoom: f32 },

    #[serde(rename = "camera.ZoomBy")]
    CameraZoomBy { delta: f32 },

    #[serde(rename = "camera.TranslateToMapCenter")]
    CameraTranslateToMapCenter { map: String },

    #[serde(rename = "screen.Resize")]
    ScreenResize { width: u32, height: u32 },
}

impl Command {
    /// Decode a raw host event: a string tag plus a JSON payload.
    ///
    /// Unknown tags and malformed payloads both surface as
    /// [`SceneError::CommandDecode`]; the dispatch boundary logs and drops
    /// them, the queue advances either way.
    pub fn decode(kind: &str, payload: &str) -> Result<Command, SceneError> {
        let decode_err = |source| SceneError::CommandDecode {
            kind: kind.to_string(),
            source,
        };
        let payload: serde_json::Value = serde_json::from_str(payload).map_err(decode_err)?;
        let envelope = serde_json::json!({ "type": kind, "payload": payload });
        serde_json::from_value(envelope).map_err(decode_err)
    }
}

/// Thread-safe FIFO inbox of decoded commands.
///
/// Wrap it in an `Arc` and hand clones to whatever host bridge produces
/// events; the engine keeps one for consumption in its tick.
#[derive(Debug, Default)]
pub struct CommandQueue {
    events: RwLock<VecDeque<Command>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and append a raw host event (string tag + JSON payload).
    ///
    /// Unrecognized or malformed events are logged and ignored; the queue
    /// advances either way. Returns whether the event was accepted.
    pub fn push_raw(&self, kind: &str, payload: &str) -> bool {
        match Command::decode(kind, payload) {
            Ok(command) => {
                self.push(command);
                true
            }
            Err(e) => {
                log::warn!("dropping host event: {e}");
                false
            }
        }
    }

    /// Append a command. May be called from any thread.
    pub fn push(&self, command: Command) {
        self.write().push_back(command);
    }

    pub fn has_pending(&self) -> bool {
        !self.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_pending()
    }

    /// Remove and return the oldest command, if any.
    pub fn pop(&self) -> Option<Command> {
        self.write().pop_front()
    }

    fn read(&self) -> RwLockReadGuard<'_, VecDeque<Command>> {
        self.events.read().expect("command queue lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<Command>> {
        self.events.write().expect("command queue lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_add_map_with_camel_case_fields() {
        let cmd = Command::decode(
            "world.AddMap",
            r#"{"name":"main","width":8,"height":6,"tileWidth":16,"tileHeight":16}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::AddMap {
                name: "main".to_string(),
                width: 8,
                height: 6,
                tile_width: 16,
                tile_height: 16,
            }
        );
    }

    #[test]
    fn decodes_layer_data_grid() {
        let cmd = Command::decode(
            "world.AddLayerData",
            r#"{"map":"main","layer":"bg","data":[[1,2],[3,4]]}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::AddLayerData {
                map: "main".to_string(),
                layer: "bg".to_string(),
                data: vec![vec![1, 2], vec![3, 4]],
            }
        );
    }

    #[test]
    fn unknown_tag_is_a_decode_error() {
        let err = Command::decode("world.Explode", "{}").unwrap_err();
        assert!(matches!(err, SceneError::CommandDecode { .. }));
    }

    #[test]
    fn push_raw_drops_malformed_events() {
        let queue = CommandQueue::new();
        assert!(!queue.push_raw("world.Explode", "{}"));
        assert!(!queue.push_raw("camera.Zoom", "not json"));
        assert!(queue.push_raw("camera.Zoom", r#"{"zoom":1.5}"#));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn queue_is_first_in_first_out() {
        let queue = CommandQueue::new();
        queue.push(Command::CameraZoom { zoom: 2.0 });
        queue.push(Command::CameraZoomBy { delta: 0.5 });
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(Command::CameraZoom { zoom: 2.0 }));
        assert_eq!(queue.pop(), Some(Command::CameraZoomBy { delta: 0.5 }));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }
}
