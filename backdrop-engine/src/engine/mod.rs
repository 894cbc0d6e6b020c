//! Procedural background engine.
//!
//! The scene core (geometry, pool, builders, stepper, hover) is plain data and
//! runs without an ECS world. `core`, `systems` and `render` wire it into Bevy.

pub mod animation;
pub mod builders;
pub mod camera;
pub mod controller;
pub mod core;
pub mod geometry;
pub mod glyph;
pub mod hover;
pub mod render;
pub mod scene;
pub mod systems;
pub mod theme_cycle;
