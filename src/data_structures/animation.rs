//! Frame-cycling tile animations.
//!
//! An [`Animation`] is a list of tile indices played in a loop with a fixed
//! per-frame delay. [`AnimatedTile`] pins such an animation to one cell of
//! one layer; the flow advances it every tick and routes frame changes
//! through `World::set_tile`, which makes animation just another single-cell
//! UV rewrite.

use serde::Deserialize;

/// A looping sequence of tile indices with a fixed frame delay in seconds.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Animation {
    pub frames: Vec<i32>,
    pub delay: f32,
}

/// An animation instance bound to one map cell.
#[derive(Clone, Debug)]
pub struct AnimatedTile {
    pub map: String,
    pub layer: String,
    /// Cell coordinates in storage order.
    pub x: usize,
    pub y: usize,
    pub animation: Animation,
    frame_index: usize,
    time: f32,
}

impl AnimatedTile {
    pub fn new(map: &str, layer: &str, x: usize, y: usize, animation: Animation) -> Self {
        Self {
            map: map.to_string(),
            layer: layer.to_string(),
            x,
            y,
            animation,
            frame_index: 0,
            time: 0.0,
        }
    }

    /// Advance by `dt` seconds. Returns `true` when the frame changed and the
    /// cell needs a rewrite.
    pub fn update(&mut self, dt: f32) -> bool {
        self.time += dt;
        if self.time >= self.animation.delay {
            self.time = 0.0;
            self.frame_index += 1;
            if self.frame_index >= self.animation.frames.len() {
                self.frame_index = 0;
            }
            return true;
        }
        false
    }

    /// Tile index of the current frame.
    pub fn tile(&self) -> i32 {
        self.animation.frames[self.frame_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_frames_on_delay() {
        let mut tile = AnimatedTile::new(
            "m",
            "bg",
            0,
            0,
            Animation {
                frames: vec![4, 5, 6],
                delay: 0.5,
            },
        );
        assert_eq!(tile.tile(), 4);
        assert!(!tile.update(0.3));
        assert!(tile.update(0.3));
        assert_eq!(tile.tile(), 5);
        assert!(tile.update(0.5));
        assert_eq!(tile.tile(), 6);
        assert!(tile.update(0.5));
        assert_eq!(tile.tile(), 4);
    }
}
