//! Flow control and the per-frame tick.
//!
//! This module wires the scene pieces together. A [`SceneFlow`] owns the
//! world, camera, screen and command queue, plus the [`RenderDriver`] it
//! draws through. The embedding runtime (native loop, wasm
//! requestAnimationFrame callback, test harness) is expected to call
//! [`App::tick`] once per display refresh.
//!
//! # Tick order
//!
//! Each tick runs strictly in this sequence, all on the calling thread:
//! 1. Dequeue at most one command and apply it; failures are logged and the
//!    loop carries on (a malformed command must never take down a running
//!    visual surface)
//! 2. Advance animated tiles, rewriting cells whose frame changed
//! 3. `World::sync` (a no-op when nothing is stale)
//! 4. Draw: viewport, clear, texture bind, then buffers and draw calls per
//!    map and layer
//!
//! Only the command queue is shared across threads; world and mesh data are
//! owned exclusively by the tick.

use std::sync::Arc;

use crate::camera::Camera2D;
use crate::commands::{Command, CommandQueue};
use crate::data_structures::animation::AnimatedTile;
use crate::data_structures::world::World;
use crate::error::SceneError;
use crate::render::{Color, RenderDriver, Screen};

/// Minimal application lifecycle: set up once, then tick per frame.
pub trait App {
    fn init(&mut self) -> anyhow::Result<()>;

    /// Run one frame; `dt` is the elapsed time in seconds.
    fn tick(&mut self, dt: f32);
}

/// The default scene application: world + camera driven by host commands.
pub struct SceneFlow<D: RenderDriver> {
    pub world: World,
    pub camera: Camera2D,
    pub screen: Screen,
    pub background: Color,
    commands: Arc<CommandQueue>,
    animated: Vec<AnimatedTile>,
    driver: D,
}

impl<D: RenderDriver> SceneFlow<D> {
    pub fn new(driver: D, screen: Screen) -> Self {
        Self {
            world: World::new(),
            camera: Camera2D::new(),
            screen,
            background: Color::WHITE,
            commands: Arc::new(CommandQueue::new()),
            animated: Vec::new(),
            driver,
        }
    }

    /// Handle to the shared inbox. Clone it into whatever host bridge
    /// produces events.
    pub fn commands(&self) -> Arc<CommandQueue> {
        Arc::clone(&self.commands)
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Register a tile animation; the cell is rewritten whenever its frame
    /// advances.
    pub fn animate_tile(&mut self, tile: AnimatedTile) {
        self.animated.push(tile);
    }

    /// Apply one decoded command to the scene.
    pub fn apply(&mut self, command: Command) -> Result<(), SceneError> {
        match command {
            Command::LoadTileset { data } => {
                let image = self.world.resources.load_tileset(&data)?;
                let (width, height) = image.dimensions();
                let texture = self.driver.upload_texture(width, height, image.as_raw());
                self.world.resources.texture = Some(texture);
                // Earlier layer writes may predate the atlas; rebuild all.
                self.world.resync();
            }
            Command::SetBackground { color } => {
                self.background = Color::from_hex(&color);
            }
            Command::AddMap {
                name,
                width,
                height,
                tile_width,
                tile_height,
            } => {
                self.world
                    .add_map(&name, width, height, tile_width, tile_height)?;
            }
            Command::AddLayer { map, name, z } => {
                self.world.add_layer(&map, &name, z)?;
            }
            Command::AddLayerData { map, layer, data } => {
                self.world.add_layer_data(&map, &layer, data)?;
            }
            Command::SetTile {
                map,
                layer,
                x,
                y,
                tile,
            } => {
                self.world.set_tile(&map, &layer, x, y, tile)?;
            }
            Command::CameraTranslate { x, y } => {
                self.camera.translate(x, y);
            }
            Command::CameraTranslateBy { x, y } => {
                self.camera.translate_by(x, y);
            }
            Command::CameraZoom { zoom } => {
                self.camera.set_zoom(zoom);
            }
            Command::CameraZoomBy { delta } => {
                self.camera.zoom_by(delta);
            }
            Command::CameraTranslateToMapCenter { map } => {
                let m = self
                    .world
                    .map(&map)
                    .ok_or_else(|| SceneError::MapNotFound(map.clone()))?;
                let (cx, cy) = m.center();
                self.camera.translate(cx, cy);
            }
            Command::ScreenResize { width, height } => {
                self.screen.resize(width, height);
            }
        }
        Ok(())
    }

    fn animate(&mut self, dt: f32) {
        for tile in &mut self.animated {
            if tile.update(dt) {
                if let Err(e) = self
                    .world
                    .set_tile(&tile.map, &tile.layer, tile.x, tile.y, tile.tile())
                {
                    log::warn!("animated tile skipped: {e}");
                }
            }
        }
    }

    fn draw(&mut self) {
        self.driver.set_viewport(self.screen.width, self.screen.height);
        self.driver.clear(self.background);

        if let Some(texture) = self.world.resources.texture {
            self.driver.bind_texture(texture);
        }

        let projection = self.camera.projection(&self.screen);
        for map in self.world.maps() {
            self.driver.upload_vertices(map.mesh.vertices.as_slice());
            for submesh in &map.mesh.submeshes {
                self.driver
                    .set_matrices(submesh.model, self.camera.view, projection);
                self.driver.upload_uv(submesh.uvs.as_slice());
                self.driver.draw_triangles(map.vertices_needed());
            }
        }
    }
}

impl<D: RenderDriver> App for SceneFlow<D> {
    fn init(&mut self) -> anyhow::Result<()> {
        self.driver.set_viewport(self.screen.width, self.screen.height);
        log::info!(
            "scene flow ready, viewport {}x{}",
            self.screen.width,
            self.screen.height
        );
        Ok(())
    }

    fn tick(&mut self, dt: f32) {
        if let Some(command) = self.commands.pop() {
            if let Err(e) = self.apply(command) {
                log::error!("command failed: {e}");
            }
        }

        self.animate(dt);
        self.world.sync();
        self.draw();
    }
}
