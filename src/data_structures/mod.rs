/**
 * This module contains the scene data models: the world aggregate and its
 * maps, layers, meshes, tileset atlas math and tile animations.
 */
pub mod animation;
pub mod map;
pub mod mesh;
pub mod tileset;
pub mod world;
